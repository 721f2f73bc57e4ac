//! Python bindings

use crate::config::TriageConfig;
use crate::core::geodetic;
use crate::core::pipeline::TriagePipeline;
use crate::io::{CapellaReader, UmbraReader};
use crate::types::{SceneRecord, TriageError};
use numpy::{IntoPyArray, PyArray2, PyReadonlyArray2};
use pyo3::exceptions::{PyIOError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;
use std::path::PathBuf;

fn to_py_err(e: TriageError) -> PyErr {
    match e {
        TriageError::Io(_) => PyIOError::new_err(e.to_string()),
        TriageError::Config(_) | TriageError::InvalidFormat(_) => PyValueError::new_err(e.to_string()),
        _ => PyRuntimeError::new_err(e.to_string()),
    }
}

fn record_to_dict<'py>(py: Python<'py>, record: &SceneRecord) -> PyResult<&'py PyDict> {
    let dict = PyDict::new(py);
    dict.set_item("sensor", record.sensor.to_string())?;
    dict.set_item("filename", &record.filename)?;
    dict.set_item("filepath", &record.filepath)?;
    dict.set_item("satellite", &record.satellite)?;
    dict.set_item("mode", &record.mode)?;
    dict.set_item("polarization", record.polarization.to_string())?;
    dict.set_item("collect_date", record.collect_date.map(|d| d.to_string()))?;
    dict.set_item("center_lat", record.center_lat)?;
    dict.set_item("center_lon", record.center_lon)?;
    dict.set_item("azimuth_resolution_m", record.azimuth_resolution_m)?;
    dict.set_item("range_resolution_m", record.range_resolution_m)?;
    dict.set_item("incidence_angle_deg", record.incidence_angle_deg)?;
    dict.set_item("product_type", &record.product_type)?;
    dict.set_item("center_frequency_ghz", record.center_frequency_ghz)?;
    Ok(dict)
}

/// Convert one ECEF position (m) to (lat deg, lon deg, height m)
#[pyfunction]
#[pyo3(name = "ecef_to_geodetic")]
fn py_ecef_to_geodetic(x: f64, y: f64, z: f64) -> (f64, f64, f64) {
    geodetic::ecef_to_geodetic(x, y, z)
}

/// Convert an N x 3 array of ECEF positions to an N x 3 array of (lat, lon, height)
#[pyfunction]
#[pyo3(name = "ecef_to_geodetic_batch")]
fn py_ecef_to_geodetic_batch<'py>(
    py: Python<'py>,
    positions: PyReadonlyArray2<'py, f64>,
) -> PyResult<&'py PyArray2<f64>> {
    let geodetic = geodetic::ecef_to_geodetic_batch(positions.as_array()).map_err(to_py_err)?;
    Ok(geodetic.into_pyarray(py))
}

/// Parse an Umbra METADATA.json file into a record dict
#[pyfunction]
fn parse_umbra_metadata(py: Python, path: String) -> PyResult<PyObject> {
    let record = UmbraReader::read_metadata(&path).map_err(to_py_err)?;
    Ok(record_to_dict(py, &record)?.into())
}

/// Parse a Capella extended.json file into a record dict
#[pyfunction]
#[pyo3(signature = (path, default_incidence_angle_deg = 35.0))]
fn parse_capella_metadata(py: Python, path: String, default_incidence_angle_deg: f64) -> PyResult<PyObject> {
    let record = CapellaReader::new(default_incidence_angle_deg)
        .read_metadata(&path)
        .map_err(to_py_err)?;
    Ok(record_to_dict(py, &record)?.into())
}

/// Run the full triage and return a summary dict
#[pyfunction]
#[pyo3(signature = (config_path = None, output_dir = None))]
fn run_triage(py: Python, config_path: Option<String>, output_dir: Option<String>) -> PyResult<PyObject> {
    let mut config = match config_path {
        Some(path) => TriageConfig::from_file(path).map_err(to_py_err)?,
        None => TriageConfig::default(),
    };
    if let Some(dir) = output_dir {
        config.output_dir = PathBuf::from(dir);
    }

    let report = TriagePipeline::new(config).run().map_err(to_py_err)?;

    let result = PyDict::new(py);
    result.set_item("umbra_files", report.umbra_files)?;
    result.set_item("umbra_records", report.umbra_records)?;
    result.set_item("capella_files", report.capella_files)?;
    result.set_item("capella_records", report.capella_records)?;
    result.set_item("skipped_files", report.skipped_files)?;

    let selections = PyDict::new(py);
    for outcome in &report.selections {
        let entry = PyDict::new(py);
        entry.set_item("matched", outcome.matched)?;
        entry.set_item(
            "output_path",
            outcome.output_path.as_ref().map(|p| p.display().to_string()),
        )?;
        selections.set_item(&outcome.name, entry)?;
    }
    result.set_item("selections", selections)?;

    Ok(result.into())
}

/// Python module definition
#[pymodule]
fn _core(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_ecef_to_geodetic, m)?)?;
    m.add_function(wrap_pyfunction!(py_ecef_to_geodetic_batch, m)?)?;
    m.add_function(wrap_pyfunction!(parse_umbra_metadata, m)?)?;
    m.add_function(wrap_pyfunction!(parse_capella_metadata, m)?)?;
    m.add_function(wrap_pyfunction!(run_triage, m)?)?;
    Ok(())
}
