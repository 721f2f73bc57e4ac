//! sar-triage: metadata triage for commercial SAR scene catalogs
//!
//! Reads Umbra and Capella per-scene metadata, normalizes it into a common
//! record, geolocates each scene (converting orbit ECEF positions to WGS84
//! geodetic coordinates where needed), selects scenes by region and quality
//! thresholds and exports the selections as CSV.

pub mod types;
pub mod config;
pub mod io;
pub mod core;

#[cfg(feature = "python")]
mod python;

// Re-export main types and functions for easier access
pub use types::{
    BoundingBox, Polarization, SceneRecord, Sensor, StateVector, TriageError, TriageResult,
};

pub use crate::config::{Selection, TriageConfig};
pub use crate::core::{ecef_to_geodetic, geodetic_to_ecef, SelectionCriteria, TriagePipeline, TriageReport};
pub use crate::io::{CapellaReader, UmbraReader};
