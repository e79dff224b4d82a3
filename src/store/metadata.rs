//! `meta.json` document types.

use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Descriptive fields shared by the hypha document and each revision entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RevisionMeta {
    pub tags: Vec<String>,
    /// Informational name
    pub name: String,
    pub comment: String,
    pub author: String,
    /// Creation time, Unix seconds
    pub time: i64,
    pub text_mime: String,
    pub binary_mime: String,
}

/// A hypha's `meta.json`
///
/// Every field is optional and unknown fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HyphaMeta {
    #[serde(flatten)]
    pub fields: RevisionMeta,
    /// Declared revisions, keyed by revision id
    pub revisions: BTreeMap<String, RevisionMeta>,
}

impl HyphaMeta {
    /// Parse a metadata document read from `path`.
    pub fn parse(bytes: &[u8], path: &Path) -> Result<Self, StorageError> {
        serde_json::from_slice(bytes).map_err(|source| StorageError::MetadataParse {
            path: path.to_path_buf(),
            source,
        })
    }
}
