use crate::types::SceneRecord;
use std::collections::HashMap;

/// Count distinct values of `key` across records, most frequent first
/// (ties broken alphabetically).
pub fn value_counts<F>(records: &[SceneRecord], key: F) -> Vec<(String, usize)>
where
    F: Fn(&SceneRecord) -> String,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    for record in records {
        *counts.entry(key(record)).or_insert(0) += 1;
    }

    let mut counts: Vec<(String, usize)> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

/// Distributions of a set of scene records
#[derive(Debug, Clone, Default)]
pub struct CatalogSummary {
    pub total: usize,
    pub by_sensor: Vec<(String, usize)>,
    pub by_platform: Vec<(String, usize)>,
    pub by_mode: Vec<(String, usize)>,
    pub by_polarization: Vec<(String, usize)>,
}

impl CatalogSummary {
    pub fn from_records(records: &[SceneRecord]) -> Self {
        Self {
            total: records.len(),
            by_sensor: value_counts(records, |r| r.sensor.to_string()),
            by_platform: value_counts(records, |r| r.satellite.clone()),
            by_mode: value_counts(records, |r| r.mode.clone()),
            by_polarization: value_counts(records, |r| r.polarization.to_string()),
        }
    }

    /// Emit the distributions through the logger
    pub fn log_summary(&self, title: &str) {
        log::info!("=== {} ({} scenes) ===", title, self.total);
        log_counts("Sensor", &self.by_sensor);
        log_counts("Platform", &self.by_platform);
        log_counts("Mode", &self.by_mode);
        log_counts("Polarization", &self.by_polarization);
    }
}

fn log_counts(label: &str, counts: &[(String, usize)]) {
    log::info!("{} distribution:", label);
    for (value, count) in counts {
        let value = if value.is_empty() { "<none>" } else { value.as_str() };
        log::info!("  {:<24} {}", value, count);
    }
}

/// One line per record: sensor, truncated file name, location, date and resolution
pub fn log_details(records: &[SceneRecord], level: log::Level) {
    if !log::log_enabled!(level) {
        return;
    }
    for record in records {
        let short_name: String = record.filename.chars().take(40).collect();
        let date = record
            .collect_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        let resolution = record
            .azimuth_resolution_m
            .map(|r| format!("{:.2}m", r))
            .unwrap_or_else(|| "n/a".to_string());

        log::log!(
            level,
            "{} - {}... ({:.2}°N, {:.2}°E) date: {} resolution: {}",
            record.sensor,
            short_name,
            record.center_lat,
            record.center_lon,
            date,
            resolution
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Polarization, Sensor};

    fn record(sensor: Sensor, satellite: &str, mode: &str) -> SceneRecord {
        SceneRecord {
            sensor,
            filename: "scene.json".to_string(),
            filepath: "scene.json".to_string(),
            satellite: satellite.to_string(),
            mode: mode.to_string(),
            polarization: Polarization::VV,
            collect_date: None,
            center_lat: 0.0,
            center_lon: 0.0,
            azimuth_resolution_m: None,
            range_resolution_m: None,
            incidence_angle_deg: None,
            product_type: String::new(),
            center_frequency_ghz: None,
        }
    }

    #[test]
    fn test_value_counts_ordering() {
        let records = vec![
            record(Sensor::Capella, "capella-5", "spotlight"),
            record(Sensor::Umbra, "UMBRA_04", "SPOTLIGHT"),
            record(Sensor::Capella, "capella-3", "stripmap"),
            record(Sensor::Capella, "capella-5", "spotlight"),
        ];

        let by_platform = value_counts(&records, |r| r.satellite.clone());
        assert_eq!(
            by_platform,
            vec![
                ("capella-5".to_string(), 2),
                ("UMBRA_04".to_string(), 1),
                ("capella-3".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_summary_totals() {
        let records = vec![
            record(Sensor::Umbra, "UMBRA_04", "SPOTLIGHT"),
            record(Sensor::Capella, "capella-3", "stripmap"),
            record(Sensor::Capella, "capella-3", "stripmap"),
        ];
        let summary = CatalogSummary::from_records(&records);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.by_sensor[0], ("Capella".to_string(), 2));
        assert_eq!(summary.by_polarization, vec![("VV".to_string(), 3)]);
    }
}
