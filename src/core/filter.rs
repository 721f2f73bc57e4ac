use crate::types::{BoundingBox, Polarization, SceneRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Geographic region of interest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    /// Open latitude/longitude box
    Bounds(BoundingBox),
    /// Square window around a center, edges included
    Window {
        center_lat: f64,
        center_lon: f64,
        radius_deg: f64,
    },
}

impl Region {
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        match self {
            Region::Bounds(bbox) => bbox.contains(lat, lon),
            Region::Window { center_lat, center_lon, radius_deg } => {
                (lat - center_lat).abs() <= *radius_deg && (lon - center_lon).abs() <= *radius_deg
            }
        }
    }
}

/// Which records a resolution threshold applies to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionScope {
    /// Every record needs a known azimuth resolution below the threshold
    AllProducts,
    /// Only records of this product type are checked; unknown resolution passes
    ProductType(String),
}

/// Azimuth resolution threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionRule {
    pub max_m: f64,
    pub scope: ResolutionScope,
}

impl ResolutionRule {
    pub fn accepts(&self, record: &SceneRecord) -> bool {
        match &self.scope {
            ResolutionScope::AllProducts => record
                .azimuth_resolution_m
                .map_or(false, |res| res < self.max_m),
            ResolutionScope::ProductType(product_type) => {
                if &record.product_type != product_type {
                    return true;
                }
                !matches!(record.azimuth_resolution_m, Some(res) if res > self.max_m)
            }
        }
    }
}

/// Selection criteria. Unset fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionCriteria {
    pub region: Option<Region>,
    pub modes: Option<Vec<String>>,
    pub polarizations: Option<Vec<Polarization>>,
    pub resolution: Option<ResolutionRule>,
    pub collected_after: Option<NaiveDate>,
}

impl SelectionCriteria {
    /// Korean peninsula mainland, 33-39°N 125-130°E
    pub fn korea_mainland() -> Self {
        Self {
            region: Some(Region::Bounds(BoundingBox::new(33.0, 39.0, 125.0, 130.0))),
            ..Default::default()
        }
    }

    /// Mainland plus North Korea, Yellow Sea and East Sea, 30-42°N 120-135°E
    pub fn korea_extended() -> Self {
        Self {
            region: Some(Region::Bounds(BoundingBox::new(30.0, 42.0, 120.0, 135.0))),
            ..Default::default()
        }
    }

    /// Recent high-resolution scenes in the extended Korea region
    pub fn research_priority() -> Self {
        Self {
            resolution: Some(ResolutionRule {
                max_m: 1.0,
                scope: ResolutionScope::AllProducts,
            }),
            collected_after: NaiveDate::from_ymd_opt(2023, 1, 1),
            ..Self::korea_extended()
        }
    }

    /// Spotlight/stripmap VV or HH scenes within 2° of 36.5°N 127.5°E
    pub fn capella_selection() -> Self {
        Self {
            region: Some(Region::Window {
                center_lat: 36.5,
                center_lon: 127.5,
                radius_deg: 2.0,
            }),
            modes: Some(vec!["spotlight".to_string(), "stripmap".to_string()]),
            polarizations: Some(vec![Polarization::VV, Polarization::HH]),
            resolution: Some(ResolutionRule {
                max_m: 1.0,
                scope: ResolutionScope::ProductType("GEO".to_string()),
            }),
            collected_after: None,
        }
    }

    pub fn matches(&self, record: &SceneRecord) -> bool {
        if let Some(region) = &self.region {
            if !region.contains(record.center_lat, record.center_lon) {
                return false;
            }
        }

        if let Some(modes) = &self.modes {
            if !modes.iter().any(|m| m.eq_ignore_ascii_case(&record.mode)) {
                return false;
            }
        }

        if let Some(polarizations) = &self.polarizations {
            if !polarizations.contains(&record.polarization) {
                return false;
            }
        }

        if let Some(rule) = &self.resolution {
            if !rule.accepts(record) {
                return false;
            }
        }

        if let Some(after) = self.collected_after {
            if !record.collect_date.map_or(false, |date| date > after) {
                return false;
            }
        }

        true
    }
}

/// Keep the records matching `criteria`, in input order
pub fn select(records: &[SceneRecord], criteria: &SelectionCriteria) -> Vec<SceneRecord> {
    records
        .iter()
        .filter(|record| criteria.matches(record))
        .cloned()
        .collect()
}
