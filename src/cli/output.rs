//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ApiError;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::HyphaNotFound(name) => format!("error: no hypha named '{}'", name),
        ApiError::RevisionNotFound { hypha, revision } => {
            format!("error: hypha '{}' has no revision {}", hypha, revision)
        }
        ApiError::NoRevisions(name) => format!("error: hypha '{}' has no revisions", name),
        other => format!("error: {}", other),
    }
}
