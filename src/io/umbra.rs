use crate::types::{parse_collect_date, Polarization, SceneRecord, Sensor, TriageError, TriageResult};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Umbra `*_METADATA.json` document (only the fields used for triage)
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UmbraMetadata {
    #[serde(rename = "umbraSatelliteName")]
    pub satellite_name: Option<String>,
    #[serde(rename = "imagingMode")]
    pub imaging_mode: Option<String>,
    #[serde(rename = "productSku")]
    pub product_sku: Option<String>,
    pub collects: Option<Vec<UmbraCollect>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UmbraCollect {
    #[serde(rename = "startAtUTC")]
    pub start_at_utc: Option<String>,
    pub polarizations: Option<Vec<String>>,
    #[serde(rename = "sceneCenterPointLla")]
    pub scene_center_point_lla: Option<GeoJsonPoint>,
    #[serde(rename = "maxGroundResolution")]
    pub max_ground_resolution: Option<GroundResolution>,
    #[serde(rename = "angleIncidenceDegrees")]
    pub angle_incidence_degrees: Option<f64>,
}

/// GeoJSON point, coordinates ordered [lon, lat, alt]
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GeoJsonPoint {
    pub coordinates: Vec<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GroundResolution {
    #[serde(rename = "azimuthMeters")]
    pub azimuth_meters: Option<f64>,
    #[serde(rename = "rangeMeters")]
    pub range_meters: Option<f64>,
}

/// Umbra metadata reader
pub struct UmbraReader;

impl UmbraReader {
    /// Read and normalize one Umbra metadata file
    pub fn read_metadata<P: AsRef<Path>>(path: P) -> TriageResult<SceneRecord> {
        let path = path.as_ref();
        log::debug!("Reading Umbra metadata: {}", path.display());

        let content = fs::read_to_string(path)?;
        Self::parse_metadata(&content, path)
    }

    /// Normalize Umbra metadata JSON. `path` only feeds the filename columns.
    pub fn parse_metadata(content: &str, path: &Path) -> TriageResult<SceneRecord> {
        let metadata: UmbraMetadata = serde_json::from_str(content)?;

        let collect = metadata
            .collects
            .and_then(|collects| collects.into_iter().next())
            .unwrap_or_default();

        let coordinates = collect
            .scene_center_point_lla
            .map(|point| point.coordinates)
            .unwrap_or_default();
        if coordinates.len() < 2 {
            return Err(TriageError::MissingField(
                "collects[0].sceneCenterPointLla.coordinates".to_string(),
            ));
        }
        let (lon, lat) = (coordinates[0], coordinates[1]);

        let polarization = collect
            .polarizations
            .as_ref()
            .and_then(|pols| pols.first())
            .map(|code| Polarization::from_code(code))
            .unwrap_or(Polarization::Unknown);

        let resolution = collect.max_ground_resolution.unwrap_or_default();

        Ok(SceneRecord {
            sensor: Sensor::Umbra,
            filename: file_name(path),
            filepath: path.display().to_string(),
            satellite: metadata.satellite_name.unwrap_or_default(),
            mode: metadata.imaging_mode.unwrap_or_default(),
            polarization,
            collect_date: collect.start_at_utc.as_deref().and_then(parse_collect_date),
            center_lat: lat,
            center_lon: lon,
            azimuth_resolution_m: resolution.azimuth_meters,
            range_resolution_m: resolution.range_meters,
            incidence_angle_deg: collect.angle_incidence_degrees,
            product_type: metadata.product_sku.unwrap_or_default(),
            center_frequency_ghz: None,
        })
    }
}

pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const SAMPLE: &str = r#"{
        "umbraSatelliteName": "UMBRA_05",
        "imagingMode": "SPOTLIGHT",
        "productSku": "UMB-SPOTLIGHT-50-1",
        "collects": [{
            "startAtUTC": "2023-08-14T01:22:31.581617+00:00",
            "polarizations": ["VV"],
            "sceneCenterPointLla": {"type": "Point", "coordinates": [126.978, 37.5665, 38.0]},
            "maxGroundResolution": {"azimuthMeters": 0.5, "rangeMeters": 0.48},
            "angleIncidenceDegrees": 41.2
        }]
    }"#;

    #[test]
    fn test_parse_umbra_metadata() {
        let path = Path::new("/catalog/umbra/2023-08-14/seoul_METADATA.json");
        let record = UmbraReader::parse_metadata(SAMPLE, path).unwrap();

        assert_eq!(record.sensor, Sensor::Umbra);
        assert_eq!(record.filename, "seoul_METADATA.json");
        assert_eq!(record.satellite, "UMBRA_05");
        assert_eq!(record.mode, "SPOTLIGHT");
        assert_eq!(record.polarization, Polarization::VV);
        assert_eq!(record.collect_date, NaiveDate::from_ymd_opt(2023, 8, 14));
        assert_eq!(record.center_lat, 37.5665);
        assert_eq!(record.center_lon, 126.978);
        assert_eq!(record.azimuth_resolution_m, Some(0.5));
        assert_eq!(record.range_resolution_m, Some(0.48));
        assert_eq!(record.incidence_angle_deg, Some(41.2));
        assert_eq!(record.product_type, "UMB-SPOTLIGHT-50-1");
        assert_eq!(record.center_frequency_ghz, None);
    }

    #[test]
    fn test_missing_location_is_rejected() {
        let content = r#"{"collects": [{"sceneCenterPointLla": {"coordinates": [126.9]}}]}"#;
        let result = UmbraReader::parse_metadata(content, Path::new("x_METADATA.json"));
        assert!(matches!(result, Err(TriageError::MissingField(_))));

        let result = UmbraReader::parse_metadata("{}", Path::new("x_METADATA.json"));
        assert!(matches!(result, Err(TriageError::MissingField(_))));
    }

    #[test]
    fn test_sparse_collect_defaults() {
        let content = r#"{"productSku": null, "collects": [{"sceneCenterPointLla": {"coordinates": [10.0, 20.0]}}]}"#;
        let record = UmbraReader::parse_metadata(content, Path::new("x_METADATA.json")).unwrap();
        assert_eq!(record.polarization, Polarization::Unknown);
        assert_eq!(record.collect_date, None);
        assert_eq!(record.product_type, "");
        assert_eq!(record.azimuth_resolution_m, None);
    }

    #[test]
    fn test_empty_polarization_list_is_kept() {
        let content = SAMPLE.replace(r#""polarizations": ["VV"]"#, r#""polarizations": []"#);
        let record = UmbraReader::parse_metadata(&content, Path::new("x_METADATA.json")).unwrap();
        assert_eq!(record.polarization, Polarization::Unknown);
        assert_eq!(record.center_lat, 37.5665);
    }

    #[test]
    fn test_malformed_json() {
        let result = UmbraReader::parse_metadata("{\"collects\": 5}", Path::new("x_METADATA.json"));
        assert!(matches!(result, Err(TriageError::Json(_))));
    }
}
