//! Node name classification
//!
//! Maps the name of a directory entry to the role it plays inside a hypha
//! directory. Rules are tried in a fixed order and the first match wins, so a
//! name like `12.txt` is a text revision even though no hypha rule would
//! reject it for other reasons.

use once_cell::sync::Lazy;
use regex::Regex;

/// Hypha name pattern, unanchored so it can be embedded in larger patterns.
///
/// A name may not start with whitespace, a digit, or one of `: / ? & \`, and
/// may not contain `: ? & \` anywhere after that.
pub const HYPHA_PATTERN: &str = r"[^[:space:][:digit:]:/?&\\][^:?&\\]*";

/// Name of the per-hypha metadata document.
pub const META_FILE_NAME: &str = "meta.json";

static TEXT_REVISION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([[:digit:]]+)\.txt$").unwrap());

static BINARY_REVISION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([[:digit:]]+)\.bin$").unwrap());

static HYPHA_NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("^{}$", HYPHA_PATTERN)).unwrap());

/// Payload kind of a revision file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PayloadKind {
    Text,
    Binary,
}

impl PayloadKind {
    /// File extension used on disk for this kind.
    pub fn extension(self) -> &'static str {
        match self {
            PayloadKind::Text => "txt",
            PayloadKind::Binary => "bin",
        }
    }
}

/// What a directory entry name means to the scanner
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Candidate sub-hypha; only meaningful when the entry is a directory.
    HyphaDir,
    /// `<digits>.txt`, carrying the revision id.
    TextRevision(String),
    /// `<digits>.bin`, carrying the revision id.
    BinaryRevision(String),
    /// `meta.json`
    Metadata,
    /// Anything else. Ignored without error.
    Unrecognized,
}

impl NodeKind {
    /// Revision id and payload kind, if this is a revision file.
    pub fn revision(&self) -> Option<(&str, PayloadKind)> {
        match self {
            NodeKind::TextRevision(id) => Some((id, PayloadKind::Text)),
            NodeKind::BinaryRevision(id) => Some((id, PayloadKind::Binary)),
            _ => None,
        }
    }
}

/// Classify a directory entry by name alone.
pub fn classify(name: &str) -> NodeKind {
    if let Some(caps) = TEXT_REVISION_REGEX.captures(name) {
        return NodeKind::TextRevision(caps[1].to_string());
    }
    if let Some(caps) = BINARY_REVISION_REGEX.captures(name) {
        return NodeKind::BinaryRevision(caps[1].to_string());
    }
    if name == META_FILE_NAME {
        return NodeKind::Metadata;
    }
    if is_hypha_name(name) {
        return NodeKind::HyphaDir;
    }
    NodeKind::Unrecognized
}

/// Whether a single path segment is acceptable as a hypha name.
pub fn is_hypha_name(name: &str) -> bool {
    HYPHA_NAME_REGEX.is_match(name)
}
