//! Hypha and revision records

use crate::error::StorageError;
use crate::store::metadata::RevisionMeta;
use crate::tree::classify::PayloadKind;
use crate::tree::path;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// One versioned snapshot of a hypha
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Revision {
    /// Owning hypha's full name
    pub hypha: String,
    /// Revision id as written on disk and in `meta.json`
    pub id: String,
    pub tags: Vec<String>,
    /// Informational name from `meta.json`
    pub name: String,
    pub comment: String,
    pub author: String,
    /// Creation time, Unix seconds
    pub time: i64,
    pub text_mime: String,
    /// Empty when the revision has no binary payload
    pub binary_mime: String,
    pub text_path: Option<PathBuf>,
    pub binary_path: Option<PathBuf>,
}

impl Revision {
    /// Build a declared revision with no payload paths resolved yet.
    pub fn from_meta(hypha: &str, id: &str, meta: RevisionMeta) -> Self {
        Self {
            hypha: hypha.to_string(),
            id: id.to_string(),
            tags: meta.tags,
            name: meta.name,
            comment: meta.comment,
            author: meta.author,
            time: meta.time,
            text_mime: meta.text_mime,
            binary_mime: meta.binary_mime,
            text_path: None,
            binary_path: None,
        }
    }

    /// Sequence number: the numeric value of the id, if it is numeric.
    pub fn sequence(&self) -> Option<u64> {
        self.id.parse().ok()
    }

    /// Whether a binary payload is attached.
    ///
    /// Assembly clears `binary_mime` for revisions without a binary file, so
    /// the MIME type alone decides.
    pub fn has_binary_data(&self) -> bool {
        !self.binary_mime.is_empty()
    }

    /// Whether any payload file was found on disk.
    pub fn has_files(&self) -> bool {
        self.text_path.is_some() || self.binary_path.is_some()
    }

    /// Read the text payload.
    pub fn read_text(&self) -> Result<String, StorageError> {
        let path = self.payload_path(PayloadKind::Text)?;
        Ok(std::fs::read_to_string(path)?)
    }

    /// Read the binary payload.
    pub fn read_binary(&self) -> Result<Vec<u8>, StorageError> {
        let path = self.payload_path(PayloadKind::Binary)?;
        Ok(std::fs::read(path)?)
    }

    fn payload_path(&self, kind: PayloadKind) -> Result<&PathBuf, StorageError> {
        let path = match kind {
            PayloadKind::Text => self.text_path.as_ref(),
            PayloadKind::Binary => self.binary_path.as_ref(),
        };
        path.ok_or_else(|| StorageError::MissingPayload {
            hypha: self.hypha.clone(),
            revision: self.id.clone(),
            kind: kind.extension(),
        })
    }
}

/// A named content unit backed by a directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hypha {
    /// Path relative to the wiki root, slash separated
    pub full_name: String,
    /// Absolute directory path
    pub path: PathBuf,
    pub tags: Vec<String>,
    /// Informational name from `meta.json`
    pub name: String,
    pub comment: String,
    pub author: String,
    pub time: i64,
    pub text_mime: String,
    pub binary_mime: String,
    /// Declared revisions, keyed by id
    pub revisions: BTreeMap<String, Revision>,
    /// Full names of direct child hyphae, sorted
    pub children: Vec<String>,
}

impl Hypha {
    /// Skeleton record for a directory, filled from its metadata fields.
    pub fn new(full_name: String, path: PathBuf, fields: RevisionMeta) -> Self {
        Self {
            full_name,
            path,
            tags: fields.tags,
            name: fields.name,
            comment: fields.comment,
            author: fields.author,
            time: fields.time,
            text_mime: fields.text_mime,
            binary_mime: fields.binary_mime,
            revisions: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Directory name of the full name; None for top-level hyphae.
    pub fn parent_name(&self) -> Option<&str> {
        path::parent_name(&self.full_name)
    }

    pub fn revision(&self, id: &str) -> Option<&Revision> {
        self.revisions.get(id)
    }

    /// Declared revision with the greatest numeric id.
    pub fn newest_revision(&self) -> Option<&Revision> {
        self.revisions
            .values()
            .filter_map(|rev| rev.sequence().map(|seq| (seq, rev)))
            .max_by_key(|(seq, _)| *seq)
            .map(|(_, rev)| rev)
    }
}
