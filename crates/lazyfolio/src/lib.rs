//! Command-line front end for `lazyfolio_core`
//!
//! Reads price exports and an optional portfolio catalog from the data
//! directory, then prints simulation and comparison reports.

pub mod app;
pub mod catalog_file;
pub mod data_dir;
pub mod format;
pub mod logging;
pub mod price_files;
pub mod report;

pub use app::App;
pub use logging::init_logging;
