//! Shared presentation helpers.

use crate::error::{ApiError, StorageError};
use owo_colors::OwoColorize;
use serde::Serialize;

/// Styled section heading for text output.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// Pretty JSON, with serialization failures surfaced as storage errors.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::StorageError(StorageError::IoError(std::io::Error::from(e))))
}

/// Unix seconds as RFC 3339; "-" for unset times.
pub fn format_timestamp(secs: i64) -> String {
    if secs == 0 {
        return "-".to_string();
    }
    chrono::DateTime::from_timestamp(secs, 0)
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| secs.to_string())
}
