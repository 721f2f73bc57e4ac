use crate::core::geodetic::ecef_to_geodetic;
use crate::io::umbra::file_name;
use crate::types::{
    parse_collect_date, Polarization, SceneRecord, Sensor, StateVector, TriageError, TriageResult,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Incidence angle reported for Capella scenes, whose extended metadata has no
/// scene-level value (degrees)
pub const DEFAULT_INCIDENCE_ANGLE_DEG: f64 = 35.0;

/// Capella `*_extended.json` document (only the fields used for triage)
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CapellaMetadata {
    pub product_type: Option<String>,
    pub collect: Option<CapellaCollect>,
    pub state: Option<OrbitState>,
    pub radar: Option<RadarParameters>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CapellaCollect {
    pub platform: Option<String>,
    pub mode: Option<String>,
    pub start_timestamp: Option<String>,
    pub image: Option<ImageGeometry>,
    pub state: Option<OrbitState>,
    pub radar: Option<RadarParameters>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ImageGeometry {
    pub pixel_spacing_row: Option<f64>,
    pub pixel_spacing_column: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OrbitState {
    pub state_vectors: Vec<RawStateVector>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawStateVector {
    pub time: Option<String>,
    pub position: Vec<f64>,
    pub velocity: Option<Vec<f64>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RadarParameters {
    /// Hz
    pub center_frequency: Option<f64>,
}

impl TryFrom<&RawStateVector> for StateVector {
    type Error = TriageError;

    fn try_from(raw: &RawStateVector) -> TriageResult<Self> {
        let position = match raw.position.as_slice() {
            [x, y, z, ..] => [*x, *y, *z],
            _ => {
                return Err(TriageError::InvalidFormat(format!(
                    "state vector position has {} components, expected 3",
                    raw.position.len()
                )))
            }
        };
        let velocity = match raw.velocity.as_deref() {
            Some([vx, vy, vz, ..]) => Some([*vx, *vy, *vz]),
            _ => None,
        };
        let time = raw
            .time
            .as_deref()
            .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
            .map(|t| t.with_timezone(&Utc));

        Ok(StateVector { time, position, velocity })
    }
}

/// Capella extended metadata reader
#[derive(Debug, Clone)]
pub struct CapellaReader {
    default_incidence_angle_deg: f64,
}

impl Default for CapellaReader {
    fn default() -> Self {
        Self::new(DEFAULT_INCIDENCE_ANGLE_DEG)
    }
}

impl CapellaReader {
    pub fn new(default_incidence_angle_deg: f64) -> Self {
        Self { default_incidence_angle_deg }
    }

    /// Read and normalize one Capella extended metadata file
    pub fn read_metadata<P: AsRef<Path>>(&self, path: P) -> TriageResult<SceneRecord> {
        let path = path.as_ref();
        log::debug!("Reading Capella metadata: {}", path.display());

        let content = fs::read_to_string(path)?;
        self.parse_metadata(&content, path)
    }

    /// Normalize Capella extended JSON.
    ///
    /// Polarization comes from the file name. The scene center is the
    /// sub-satellite point of the middle orbit state vector.
    pub fn parse_metadata(&self, content: &str, path: &Path) -> TriageResult<SceneRecord> {
        let metadata: CapellaMetadata = serde_json::from_str(content)?;
        let collect = metadata.collect.unwrap_or_default();

        // Vectors are normally nested in the collect; older files keep them at the top level.
        let raw_vectors = match collect.state {
            Some(state) if !state.state_vectors.is_empty() => state.state_vectors,
            _ => metadata.state.map(|state| state.state_vectors).unwrap_or_default(),
        };
        // Only the middle vector is used; the others may be incomplete.
        let mid = raw_vectors
            .get(raw_vectors.len() / 2)
            .ok_or_else(|| TriageError::MissingField("state.state_vectors".to_string()))?;
        let [x, y, z] = StateVector::try_from(mid)?.position;
        let (lat, lon, _height) = ecef_to_geodetic(x, y, z);

        let filename = file_name(path);
        let image = collect.image.unwrap_or_default();
        let center_frequency_ghz = collect
            .radar
            .or(metadata.radar)
            .and_then(|radar| radar.center_frequency)
            .map(|hz| hz / 1e9);

        Ok(SceneRecord {
            sensor: Sensor::Capella,
            polarization: Polarization::from_filename(&filename),
            filename,
            filepath: path.display().to_string(),
            satellite: collect.platform.unwrap_or_default(),
            mode: collect.mode.unwrap_or_default(),
            collect_date: collect.start_timestamp.as_deref().and_then(parse_collect_date),
            center_lat: lat,
            center_lon: lon,
            azimuth_resolution_m: image.pixel_spacing_row,
            range_resolution_m: image.pixel_spacing_column,
            incidence_angle_deg: Some(self.default_incidence_angle_deg),
            product_type: metadata.product_type.unwrap_or_default(),
            center_frequency_ghz,
        })
    }
}
