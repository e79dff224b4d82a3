//! Error types for the hyphae store.

use std::path::PathBuf;
use thiserror::Error;

/// Storage-related errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Wiki root {path:?} is unreadable: {source}")]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory {path:?} is unreadable: {source}")]
    DirUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Failed to read metadata file {path:?}: {source}")]
    MetadataRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse metadata file {path:?}: {source}")]
    MetadataParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Revision {revision} of {hypha} has no .{kind} payload on disk")]
    MissingPayload {
        hypha: String,
        revision: String,
        kind: &'static str,
    },

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors surfaced to callers of the index (CLI, serving layer).
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Hypha not found: {0}")]
    HyphaNotFound(String),

    #[error("Revision {revision} not found in hypha {hypha}")]
    RevisionNotFound { hypha: String, revision: String },

    #[error("Hypha {0} has no revisions")]
    NoRevisions(String),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
