//! Core triage logic: geodesy, selection, reporting and the run pipeline

pub mod geodetic;
pub mod filter;
pub mod summary;
pub mod pipeline;

// Re-export main types
pub use geodetic::{ecef_to_geodetic, ecef_to_geodetic_batch, geodetic_to_ecef, mid_orbit_geolocation};
pub use filter::{select, Region, ResolutionRule, ResolutionScope, SelectionCriteria};
pub use summary::{value_counts, CatalogSummary};
pub use pipeline::{SelectionOutcome, TriagePipeline, TriageReport};
