//! Run configuration: catalog locations, policy constants and output selections

use crate::core::filter::SelectionCriteria;
use crate::io::capella::DEFAULT_INCIDENCE_ANGLE_DEG;
use crate::types::{TriageError, TriageResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// A named filter and the CSV file it is written to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub name: String,
    /// `None` only reports the match count
    #[serde(default)]
    pub output_file: Option<String>,
    #[serde(default)]
    pub criteria: SelectionCriteria,
    /// Write the file even when nothing matched
    #[serde(default)]
    pub write_empty: bool,
    /// Log distributions and one line per matched scene at info level
    #[serde(default)]
    pub log_details: bool,
}

/// Triage run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageConfig {
    pub umbra_dir: Option<PathBuf>,
    pub capella_dir: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub default_incidence_angle_deg: f64,
    /// Log progress every this many files (0 disables)
    pub progress_interval: usize,
    pub selections: Vec<Selection>,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            umbra_dir: Some(PathBuf::from("../../metadata/HR/umbra_data")),
            capella_dir: Some(PathBuf::from("../../metadata/HR/capella_data")),
            output_dir: PathBuf::from("."),
            default_incidence_angle_deg: DEFAULT_INCIDENCE_ANGLE_DEG,
            progress_interval: 500,
            selections: vec![
                Selection {
                    name: "korea_mainland".to_string(),
                    output_file: None,
                    criteria: SelectionCriteria::korea_mainland(),
                    write_empty: false,
                    log_details: false,
                },
                Selection {
                    name: "korea_region".to_string(),
                    output_file: Some("korea_region_sar_metadata.csv".to_string()),
                    criteria: SelectionCriteria::korea_extended(),
                    write_empty: true,
                    log_details: true,
                },
                Selection {
                    name: "research_priority".to_string(),
                    output_file: Some("korea_research_priority.csv".to_string()),
                    criteria: SelectionCriteria::research_priority(),
                    write_empty: false,
                    log_details: false,
                },
            ],
        }
    }
}

impl TriageConfig {
    /// Load a JSON configuration file. Missing keys take their default values.
    pub fn from_file<P: AsRef<Path>>(path: P) -> TriageResult<Self> {
        let path = path.as_ref();
        log::info!("Loading configuration: {}", path.display());

        let content = fs::read_to_string(path)?;
        let config: TriageConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> TriageResult<()> {
        if !self.default_incidence_angle_deg.is_finite()
            || !(0.0..=90.0).contains(&self.default_incidence_angle_deg)
        {
            return Err(TriageError::Config(format!(
                "default incidence angle must be within 0-90 degrees, got {}",
                self.default_incidence_angle_deg
            )));
        }

        for (i, selection) in self.selections.iter().enumerate() {
            let Some(output_file) = &selection.output_file else {
                continue;
            };
            if output_file.trim().is_empty() {
                return Err(TriageError::Config(format!(
                    "selection '{}' has an empty output file name",
                    selection.name
                )));
            }
            if self.selections[..i]
                .iter()
                .any(|s| s.output_file.as_ref() == Some(output_file))
            {
                return Err(TriageError::Config(format!(
                    "output file '{}' is used by more than one selection",
                    output_file
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::{Region, ResolutionScope};
    use tempfile::TempDir;

    #[test]
    fn test_default_selections() {
        let config = TriageConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.selections.len(), 3);

        let mainland = &config.selections[0];
        assert_eq!(mainland.criteria, SelectionCriteria::korea_mainland());
        assert!(mainland.output_file.is_none());

        assert!(config.selections[1].write_empty);
        assert!(!config.selections[2].write_empty);

        // Only the extended region gets per-scene detail at info level
        let detailed: Vec<&str> = config
            .selections
            .iter()
            .filter(|s| s.log_details)
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(detailed, vec!["korea_region"]);
        assert_eq!(config.default_incidence_angle_deg, 35.0);
    }

    #[test]
    fn test_partial_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("triage.json");
        fs::write(
            &path,
            r#"{
                "capella_dir": "/data/capella",
                "umbra_dir": null,
                "default_incidence_angle_deg": 40.0,
                "selections": [{
                    "name": "capella",
                    "output_file": "capella_filtered_metadata.csv",
                    "criteria": {
                        "region": {"window": {"center_lat": 36.5, "center_lon": 127.5, "radius_deg": 2.0}},
                        "modes": ["spotlight", "stripmap"],
                        "polarizations": ["VV", "HH"],
                        "resolution": {"max_m": 1.0, "scope": {"product_type": "GEO"}}
                    }
                }]
            }"#,
        )
        .unwrap();

        let config = TriageConfig::from_file(&path).unwrap();
        assert_eq!(config.umbra_dir, None);
        assert_eq!(config.capella_dir, Some(PathBuf::from("/data/capella")));
        assert_eq!(config.progress_interval, 500);
        assert_eq!(config.default_incidence_angle_deg, 40.0);

        let criteria = &config.selections[0].criteria;
        assert_eq!(criteria, &SelectionCriteria::capella_selection());
        assert!(matches!(criteria.region, Some(Region::Window { .. })));
        assert_eq!(
            criteria.resolution.as_ref().map(|r| &r.scope),
            Some(&ResolutionScope::ProductType("GEO".to_string()))
        );
    }

    #[test]
    fn test_invalid_incidence_angle() {
        let config = TriageConfig {
            default_incidence_angle_deg: 120.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(TriageError::Config(_))));
    }

    #[test]
    fn test_duplicate_output_files() {
        let mut config = TriageConfig::default();
        config.selections[2].output_file = config.selections[1].output_file.clone();
        assert!(matches!(config.validate(), Err(TriageError::Config(_))));

        // Several count-only selections are fine
        config.selections[2].output_file = None;
        assert!(config.validate().is_ok());
    }
}
