//! Sequential triage run: discover, parse, merge, select, export

use crate::config::TriageConfig;
use crate::core::filter::select;
use crate::core::summary::{log_details, CatalogSummary};
use crate::io::capella::CapellaReader;
use crate::io::discovery::{find_metadata_files, CAPELLA_PATTERN, UMBRA_PATTERN};
use crate::io::export::write_records_csv;
use crate::io::umbra::UmbraReader;
use crate::types::{SceneRecord, Sensor, TriageResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of one selection
#[derive(Debug, Clone)]
pub struct SelectionOutcome {
    pub name: String,
    pub matched: usize,
    /// `None` when nothing matched and the selection skips empty output
    pub output_path: Option<PathBuf>,
}

/// Counts from a triage run
#[derive(Debug, Clone, Default)]
pub struct TriageReport {
    pub umbra_files: usize,
    pub umbra_records: usize,
    pub capella_files: usize,
    pub capella_records: usize,
    pub skipped_files: usize,
    pub selections: Vec<SelectionOutcome>,
}

impl TriageReport {
    pub fn total_records(&self) -> usize {
        self.umbra_records + self.capella_records
    }
}

/// Catalog triage pipeline
pub struct TriagePipeline {
    config: TriageConfig,
    capella: CapellaReader,
}

impl TriagePipeline {
    pub fn new(config: TriageConfig) -> Self {
        let capella = CapellaReader::new(config.default_incidence_angle_deg);
        Self { config, capella }
    }

    /// Parse every configured catalog, skipping files that fail
    pub fn load_catalogs(&self, report: &mut TriageReport) -> Vec<SceneRecord> {
        let mut records = Vec::new();

        if let Some(dir) = &self.config.umbra_dir {
            log::info!("Processing Umbra catalog: {}", dir.display());
            let files = self.discover(dir, UMBRA_PATTERN);
            report.umbra_files = files.len();
            let parsed = self.parse_all(Sensor::Umbra, &files, |path| UmbraReader::read_metadata(path));
            report.umbra_records = parsed.len();
            records.extend(parsed);
        }

        if let Some(dir) = &self.config.capella_dir {
            log::info!("Processing Capella catalog: {}", dir.display());
            let files = self.discover(dir, CAPELLA_PATTERN);
            report.capella_files = files.len();
            let parsed = self.parse_all(Sensor::Capella, &files, |path| self.capella.read_metadata(path));
            report.capella_records = parsed.len();
            records.extend(parsed);
        }

        report.skipped_files = report.umbra_files + report.capella_files - records.len();
        records
    }

    /// Run the whole triage and write the selection CSVs
    pub fn run(&self) -> TriageResult<TriageReport> {
        let mut report = TriageReport::default();
        let records = self.load_catalogs(&mut report);

        log::info!(
            "Merged {} records (Umbra: {}, Capella: {}, skipped files: {})",
            records.len(),
            report.umbra_records,
            report.capella_records,
            report.skipped_files
        );

        if records.is_empty() {
            log::warn!("No records to process");
            return Ok(report);
        }

        fs::create_dir_all(&self.config.output_dir)?;

        for selection in &self.config.selections {
            let selected = select(&records, &selection.criteria);
            log::info!("Selection '{}': {} of {} records", selection.name, selected.len(), records.len());

            let output_path = match &selection.output_file {
                Some(file) if selected.is_empty() && !selection.write_empty => {
                    log::info!("Selection '{}' is empty, not writing {}", selection.name, file);
                    None
                }
                Some(file) => {
                    let path = self.config.output_dir.join(file);
                    write_records_csv(&path, &selected)?;
                    Some(path)
                }
                None => None,
            };

            if !selected.is_empty() {
                if selection.log_details {
                    CatalogSummary::from_records(&selected).log_summary(&selection.name);
                    log_details(&selected, log::Level::Info);
                } else {
                    log_details(&selected, log::Level::Debug);
                }
            }

            report.selections.push(SelectionOutcome {
                name: selection.name.clone(),
                matched: selected.len(),
                output_path,
            });
        }

        Ok(report)
    }

    fn discover(&self, dir: &Path, pattern: &str) -> Vec<PathBuf> {
        match find_metadata_files(dir, pattern) {
            Ok(files) => files,
            Err(e) => {
                log::warn!("Cannot read catalog {}: {}", dir.display(), e);
                Vec::new()
            }
        }
    }

    fn parse_all<F>(&self, sensor: Sensor, files: &[PathBuf], parse: F) -> Vec<SceneRecord>
    where
        F: Fn(&Path) -> TriageResult<SceneRecord>,
    {
        let interval = self.config.progress_interval;
        let mut records = Vec::with_capacity(files.len());

        for (i, path) in files.iter().enumerate() {
            if interval > 0 && i % interval == 0 {
                log::info!("{} progress: {}/{}", sensor, i, files.len());
            }
            match parse(path) {
                Ok(record) => records.push(record),
                Err(e) => log::warn!("Skipping {} file {}: {}", sensor, path.display(), e),
            }
        }

        log::info!("{}: parsed {} of {} files", sensor, records.len(), files.len());
        records
    }
}
