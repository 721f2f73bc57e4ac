use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Catalog vendor a scene record was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sensor {
    Umbra,
    Capella,
}

impl std::fmt::Display for Sensor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sensor::Umbra => write!(f, "Umbra"),
            Sensor::Capella => write!(f, "Capella"),
        }
    }
}

/// Polarization modes found in commercial SAR catalogs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarization {
    VV,
    VH,
    HV,
    HH,
    Unknown,
}

impl Polarization {
    /// Parse a polarization code, case-insensitive. Anything unrecognized is `Unknown`.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_uppercase().as_str() {
            "VV" => Polarization::VV,
            "VH" => Polarization::VH,
            "HV" => Polarization::HV,
            "HH" => Polarization::HH,
            _ => Polarization::Unknown,
        }
    }

    /// Infer polarization from a product file name (`_VV_` wins over `_HH_`)
    pub fn from_filename(filename: &str) -> Self {
        if filename.contains("_VV_") {
            Polarization::VV
        } else if filename.contains("_HH_") {
            Polarization::HH
        } else {
            Polarization::Unknown
        }
    }
}

impl std::fmt::Display for Polarization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Polarization::VV => write!(f, "VV"),
            Polarization::VH => write!(f, "VH"),
            Polarization::HV => write!(f, "HV"),
            Polarization::HH => write!(f, "HH"),
            Polarization::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Orbit state vector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateVector {
    pub time: Option<DateTime<Utc>>,
    pub position: [f64; 3],          // [x, y, z] in meters, ECEF
    pub velocity: Option<[f64; 3]>,  // [vx, vy, vz] in m/s
}

/// Geographic bounding box. Containment is strict on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self { min_lat, max_lat, min_lon, max_lon }
    }

    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat > self.min_lat && lat < self.max_lat && lon > self.min_lon && lon < self.max_lon
    }
}

/// Normalized scene metadata, one row of the exported tables.
///
/// Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneRecord {
    pub sensor: Sensor,
    pub filename: String,
    pub filepath: String,
    pub satellite: String,
    pub mode: String,
    pub polarization: Polarization,
    pub collect_date: Option<NaiveDate>,
    pub center_lat: f64,
    pub center_lon: f64,
    pub azimuth_resolution_m: Option<f64>,
    pub range_resolution_m: Option<f64>,
    pub incidence_angle_deg: Option<f64>,
    pub product_type: String,
    pub center_frequency_ghz: Option<f64>,
}

/// Parse the calendar date from the leading `YYYY-MM-DD` of a timestamp
pub fn parse_collect_date(timestamp: &str) -> Option<NaiveDate> {
    let day = timestamp.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// Error types for catalog triage
#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for triage operations
pub type TriageResult<T> = Result<T, TriageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polarization_from_filename() {
        assert_eq!(
            Polarization::from_filename("CAPELLA_C05_SP_GEO_VV_20230101_extended.json"),
            Polarization::VV
        );
        assert_eq!(
            Polarization::from_filename("CAPELLA_C02_SM_SLC_HH_20220704_extended.json"),
            Polarization::HH
        );
        assert_eq!(Polarization::from_filename("CAPELLA_C02_VV.json"), Polarization::Unknown);
        assert_eq!(Polarization::from_filename("x_VV_HH_y"), Polarization::VV);
    }

    #[test]
    fn test_polarization_codes() {
        assert_eq!(Polarization::from_code("vh"), Polarization::VH);
        assert_eq!(Polarization::from_code(""), Polarization::Unknown);
        assert_eq!(Polarization::Unknown.to_string(), "Unknown");
    }

    #[test]
    fn test_bounding_box_is_strict() {
        let bbox = BoundingBox::new(33.0, 39.0, 125.0, 130.0);
        assert!(bbox.contains(36.0, 127.0));
        assert!(!bbox.contains(33.0, 127.0));
        assert!(!bbox.contains(36.0, 130.0));
    }

    #[test]
    fn test_collect_date_parsing() {
        assert_eq!(
            parse_collect_date("2023-04-12T01:02:03.123456Z"),
            NaiveDate::from_ymd_opt(2023, 4, 12)
        );
        assert_eq!(parse_collect_date("2023-04"), None);
        assert_eq!(parse_collect_date("not-a-date-at-all"), None);
    }
}
