//! Single-directory scanner
//!
//! Partitions the immediate children of one directory into sub-hypha
//! candidates, revision files and the metadata file. No recursion happens
//! here; the walker drives the scanner over the tree.

use crate::error::StorageError;
use crate::tree::classify::{classify, NodeKind, PayloadKind};
use crate::tree::source::DirSource;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{instrument, trace};

/// Revision id that never counts as a real revision.
pub const RESERVED_REVISION: &str = "0";

/// On-disk payload files of one revision
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevisionFiles {
    pub text: Option<PathBuf>,
    pub binary: Option<PathBuf>,
}

impl RevisionFiles {
    /// Record the path of one payload kind.
    pub fn set(&mut self, kind: PayloadKind, path: PathBuf) {
        match kind {
            PayloadKind::Text => self.text = Some(path),
            PayloadKind::Binary => self.binary = Some(path),
        }
    }

    /// All present paths, text first.
    pub fn paths(&self) -> Vec<&Path> {
        self.text
            .iter()
            .chain(self.binary.iter())
            .map(PathBuf::as_path)
            .collect()
    }
}

/// Result of scanning one directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirScan {
    /// Scanned directory
    pub path: PathBuf,
    /// Revision id to payload files, with the reserved id already removed
    pub revisions: BTreeMap<String, RevisionFiles>,
    /// Child directories whose names match the hypha pattern, sorted
    pub subhyphae: Vec<PathBuf>,
    /// `meta.json`, if present
    pub meta_path: Option<PathBuf>,
}

impl DirScan {
    /// A directory is a hypha when it holds at least one real revision file.
    pub fn is_valid(&self) -> bool {
        !self.revisions.is_empty()
    }
}

/// Scan the immediate children of `dir`.
///
/// Children named exactly like an entry of `ignore` are skipped before
/// classification. A revision file keyed by the reserved id `0` is dropped
/// before validity is decided.
#[instrument(skip(source, ignore), fields(dir = %dir.display()))]
pub fn scan_dir(
    source: &dyn DirSource,
    dir: &Path,
    ignore: &[String],
) -> Result<DirScan, StorageError> {
    let nodes = source.list_dir(dir)?;

    let mut scan = DirScan {
        path: dir.to_path_buf(),
        ..Default::default()
    };

    for node in nodes {
        if ignore.iter().any(|pattern| pattern == &node.name) {
            trace!(name = %node.name, "Ignored entry");
            continue;
        }

        match classify(&node.name) {
            NodeKind::HyphaDir if node.is_dir => scan.subhyphae.push(node.path),
            NodeKind::Metadata if !node.is_dir => scan.meta_path = Some(node.path),
            kind => match kind.revision() {
                Some((id, payload)) if !node.is_dir => {
                    scan.revisions
                        .entry(id.to_string())
                        .or_default()
                        .set(payload, node.path);
                }
                _ => trace!(name = %node.name, "Unrecognized entry"),
            },
        }
    }

    if scan.revisions.remove(RESERVED_REVISION).is_some() {
        trace!("Dropped files of reserved revision 0");
    }
    scan.subhyphae.sort();

    Ok(scan)
}
