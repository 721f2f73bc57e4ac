//! I/O modules for discovering, reading and exporting catalog metadata

pub mod discovery;
pub mod umbra;
pub mod capella;
pub mod export;

pub use discovery::find_metadata_files;
pub use umbra::UmbraReader;
pub use capella::CapellaReader;
pub use export::write_records_csv;
