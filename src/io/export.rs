use crate::types::{SceneRecord, TriageResult};
use std::path::Path;

/// Column names, in `SceneRecord` field order
pub const CSV_COLUMNS: [&str; 14] = [
    "sensor",
    "filename",
    "filepath",
    "satellite",
    "mode",
    "polarization",
    "collect_date",
    "center_lat",
    "center_lon",
    "azimuth_resolution_m",
    "range_resolution_m",
    "incidence_angle_deg",
    "product_type",
    "center_frequency_ghz",
];

/// Write scene records as CSV with a header row.
///
/// The header is written even when `records` is empty. Missing optional values
/// become empty fields.
pub fn write_records_csv<P: AsRef<Path>>(path: P, records: &[SceneRecord]) -> TriageResult<()> {
    let path = path.as_ref();
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    writer.write_record(CSV_COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    log::info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

/// Read records back from a CSV written by [`write_records_csv`]
pub fn read_records_csv<P: AsRef<Path>>(path: P) -> TriageResult<Vec<SceneRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}
