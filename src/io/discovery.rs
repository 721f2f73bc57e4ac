use crate::types::{TriageError, TriageResult};
use std::path::{Path, PathBuf};

/// File name suffix of Umbra scene metadata
pub const UMBRA_PATTERN: &str = "*METADATA.json";

/// File name suffix of Capella extended metadata
pub const CAPELLA_PATTERN: &str = "*extended.json";

/// Recursively find files under `root` whose name matches `file_pattern`.
///
/// Results are sorted so catalog order is stable between runs. Entries that
/// cannot be read while walking are logged and skipped.
pub fn find_metadata_files<P: AsRef<Path>>(root: P, file_pattern: &str) -> TriageResult<Vec<PathBuf>> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(TriageError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("catalog directory not found: {}", root.display()),
        )));
    }

    // The root is literal; only the file name part is a pattern.
    let escaped_root = glob::Pattern::escape(&root.to_string_lossy());
    let pattern = Path::new(&escaped_root).join("**").join(file_pattern);
    let pattern = pattern.to_string_lossy();
    log::debug!("Searching {}", pattern);

    let mut files = Vec::new();
    for entry in glob::glob(&pattern)? {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => log::warn!("Skipping unreadable path: {}", e),
        }
    }
    files.sort();

    log::info!("Found {} files matching {} under {}", files.len(), file_pattern, root.display());
    Ok(files)
}
