//! Hyphae: file-backed hypha store
//!
//! Scans a wiki directory tree once at startup and builds a read-only index
//! from hypha name to its revisions, their metadata and payload file paths.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod store;
pub mod tree;

pub use config::{HyphaeConfig, ScanConfig};
pub use error::{ApiError, StorageError};
pub use store::{Hypha, HyphaIndex, Revision, ScanReport, ScanWarning};
