//! Revision presentation: show text/json.

use super::shared::{format_timestamp, to_pretty_json};
use crate::error::ApiError;
use crate::store::{Hypha, Revision};
use serde_json::json;
use std::path::PathBuf;

fn payload_line(mime: &str, path: Option<&PathBuf>) -> String {
    match path {
        Some(path) if mime.is_empty() => format!("{}", path.display()),
        Some(path) => format!("{} ({})", mime, path.display()),
        None => "none".to_string(),
    }
}

pub fn format_revision_text(hypha: &Hypha, revision: &Revision) -> String {
    let mut out = format!("Hypha: {}\n", hypha.full_name);
    out.push_str(&format!("Revision: {}", revision.id));
    if hypha.newest_revision().map(|rev| rev.id == revision.id) == Some(true) {
        out.push_str(" (newest)");
    }
    out.push('\n');
    if !revision.name.is_empty() {
        out.push_str(&format!("Name: {}\n", revision.name));
    }
    if !revision.author.is_empty() {
        out.push_str(&format!("Author: {}\n", revision.author));
    }
    out.push_str(&format!("Time: {}\n", format_timestamp(revision.time)));
    if !revision.comment.is_empty() {
        out.push_str(&format!("Comment: {}\n", revision.comment));
    }
    if !revision.tags.is_empty() {
        out.push_str(&format!("Tags: {}\n", revision.tags.join(", ")));
    }
    out.push_str(&format!(
        "Text: {}\n",
        payload_line(&revision.text_mime, revision.text_path.as_ref())
    ));
    out.push_str(&format!(
        "Binary: {}",
        payload_line(&revision.binary_mime, revision.binary_path.as_ref())
    ));
    out
}

pub fn format_revision_json(hypha: &Hypha, revision: &Revision) -> Result<String, ApiError> {
    let out = json!({
        "hypha": hypha.full_name,
        "revision": revision,
        "newest": hypha.newest_revision().map(|rev| rev.id.as_str()),
    });
    to_pretty_json(&out)
}
