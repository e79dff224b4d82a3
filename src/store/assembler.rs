//! Hypha assembly
//!
//! Reduces a [`ScanNode`] tree into hypha records. Directories are handled
//! children first, so nested hyphae are indexed whether or not their parent
//! directory is a hypha itself. For every valid directory the assembler
//! loads `meta.json`, builds the declared revisions, and attaches the payload
//! paths found on disk. Metadata is authoritative: files for undeclared
//! revisions are reported and left out.

use crate::error::StorageError;
use crate::store::hypha::{Hypha, Revision};
use crate::store::metadata::HyphaMeta;
use crate::store::report::{ScanReport, ScanWarning};
use crate::tree::path;
use crate::tree::scanner::DirScan;
use crate::tree::source::DirSource;
use crate::tree::walker::ScanNode;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, trace, warn};

/// What to do with a declared revision that has no payload file on disk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingFilesPolicy {
    /// Keep it with empty paths
    #[default]
    Keep,
    /// Drop it and record a warning
    Drop,
}

/// What to do when two directories produce the same hypha name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Last write wins
    #[default]
    Overwrite,
    /// First write wins
    KeepFirst,
}

/// Policies applied during assembly
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssemblyPolicy {
    pub missing_revision_files: MissingFilesPolicy,
    pub duplicate_names: DuplicatePolicy,
}

/// Output of one assembly pass
#[derive(Debug)]
pub struct Assembled {
    pub hyphae: HashMap<String, Hypha>,
    pub report: ScanReport,
}

/// Reduces a scan tree into hypha records
pub struct Assembler<'a> {
    source: &'a dyn DirSource,
    root: &'a Path,
    policy: AssemblyPolicy,
    hyphae: HashMap<String, Hypha>,
    report: ScanReport,
}

impl<'a> Assembler<'a> {
    pub fn new(source: &'a dyn DirSource, root: &'a Path, policy: AssemblyPolicy) -> Self {
        Self {
            source,
            root,
            policy,
            hyphae: HashMap::new(),
            report: ScanReport::default(),
        }
    }

    /// Assemble every valid directory of `tree`, then link children to parents.
    pub fn assemble(mut self, tree: &ScanNode) -> Assembled {
        self.report.dirs_scanned = tree.dir_count();
        tree.visit_post_order(&mut |node| self.reduce_node(node));
        self.link_children();

        Assembled {
            hyphae: self.hyphae,
            report: self.report,
        }
    }

    fn reduce_node(&mut self, node: &ScanNode) {
        let scan = match &node.scan {
            Ok(scan) => scan,
            Err(e) => {
                warn!(path = %node.path.display(), error = %e, "Skipping unreadable directory");
                self.report.push(ScanWarning::UnreadableDir {
                    path: node.path.clone(),
                    error: e.to_string(),
                });
                return;
            }
        };

        for looped in &node.loops {
            warn!(
                dir = %looped.path.display(),
                target = %looped.target.display(),
                "Symlink loops back to an ancestor; skipped"
            );
            self.report.push(ScanWarning::SymlinkLoop {
                path: looped.path.clone(),
                target: looped.target.clone(),
            });
        }

        if !scan.is_valid() {
            trace!(dir = %node.path.display(), "No revisions; not a hypha");
            return;
        }

        if node.depth == 0 {
            warn!(dir = %node.path.display(), "Revision files in the wiki root are ignored");
            self.report.push(ScanWarning::RootRevisions {
                path: node.path.clone(),
            });
            return;
        }

        let name = match path::hypha_name(self.root, &node.path) {
            Ok(name) => name,
            Err(e) => {
                warn!(dir = %node.path.display(), error = %e, "Cannot name hypha; skipping");
                return;
            }
        };

        if let Some(hypha) = self.materialize(name, scan) {
            self.insert(hypha);
        }
    }

    /// Build the record for a valid directory, or None if its metadata is unusable.
    fn materialize(&mut self, name: String, scan: &DirScan) -> Option<Hypha> {
        let Some(meta_path) = scan.meta_path.as_deref() else {
            warn!(hypha = %name, dir = %scan.path.display(), "No meta.json; skipping hypha");
            self.report.push(ScanWarning::MissingMetadata {
                hypha: name,
                path: scan.path.clone(),
            });
            return None;
        };

        let meta = match self.load_meta(meta_path) {
            Ok(meta) => meta,
            Err(e) => {
                warn!(
                    hypha = %name,
                    path = %meta_path.display(),
                    error = %e,
                    "Invalid meta.json; skipping hypha"
                );
                self.report.push(ScanWarning::InvalidMetadata {
                    hypha: name,
                    path: meta_path.to_path_buf(),
                    error: e.to_string(),
                });
                return None;
            }
        };

        let HyphaMeta { fields, revisions } = meta;
        let mut hypha = Hypha::new(name, scan.path.clone(), fields);
        for (id, rev_meta) in revisions {
            let revision = Revision::from_meta(&hypha.full_name, &id, rev_meta);
            hypha.revisions.insert(id, revision);
        }

        self.reconcile(&mut hypha, scan);
        Some(hypha)
    }

    fn load_meta(&self, meta_path: &Path) -> Result<HyphaMeta, StorageError> {
        let bytes = self
            .source
            .read_file(meta_path)
            .map_err(|source| StorageError::MetadataRead {
                path: meta_path.to_path_buf(),
                source,
            })?;
        HyphaMeta::parse(&bytes, meta_path)
    }

    /// Attach on-disk paths to declared revisions and apply the missing-files policy.
    fn reconcile(&mut self, hypha: &mut Hypha, scan: &DirScan) {
        for (id, files) in &scan.revisions {
            match hypha.revisions.get_mut(id) {
                Some(revision) => {
                    revision.text_path = files.text.clone();
                    revision.binary_path = files.binary.clone();
                }
                None => {
                    let paths: Vec<_> = files.paths().into_iter().map(Path::to_path_buf).collect();
                    warn!(
                        hypha = %hypha.full_name,
                        revision = %id,
                        paths = ?paths,
                        "meta.json declares no such revision; skipping its files"
                    );
                    self.report.push(ScanWarning::UndeclaredRevision {
                        hypha: hypha.full_name.clone(),
                        revision: id.clone(),
                        paths,
                    });
                }
            }
        }

        let without_files: Vec<String> = hypha
            .revisions
            .values()
            .filter(|revision| !revision.has_files())
            .map(|revision| revision.id.clone())
            .collect();
        for id in without_files {
            match self.policy.missing_revision_files {
                MissingFilesPolicy::Keep => {
                    debug!(hypha = %hypha.full_name, revision = %id, "Declared revision has no files");
                }
                MissingFilesPolicy::Drop => {
                    hypha.revisions.remove(&id);
                    warn!(hypha = %hypha.full_name, revision = %id, "Declared revision has no files; dropped");
                    self.report.push(ScanWarning::DroppedRevision {
                        hypha: hypha.full_name.clone(),
                        revision: id,
                    });
                }
            }
        }

        // An empty binary MIME type is the only "no binary data" signal readers use.
        for revision in hypha.revisions.values_mut() {
            if revision.binary_path.is_none() && !revision.binary_mime.is_empty() {
                debug!(
                    hypha = %hypha.full_name,
                    revision = %revision.id,
                    binary_mime = %revision.binary_mime,
                    "No binary file; clearing binary MIME type"
                );
                revision.binary_mime.clear();
            }
        }
    }

    fn insert(&mut self, hypha: Hypha) {
        match self.hyphae.entry(hypha.full_name.clone()) {
            Entry::Vacant(slot) => {
                debug!(
                    hypha = %hypha.full_name,
                    revisions = hypha.revisions.len(),
                    "Indexed hypha"
                );
                slot.insert(hypha);
            }
            Entry::Occupied(mut slot) => {
                let existing = slot.get().path.clone();
                let (kept, discarded) = match self.policy.duplicate_names {
                    DuplicatePolicy::Overwrite => {
                        let incoming = hypha.path.clone();
                        slot.insert(hypha);
                        (incoming, existing)
                    }
                    DuplicatePolicy::KeepFirst => (existing, hypha.path),
                };
                warn!(
                    hypha = %slot.key(),
                    kept = %kept.display(),
                    discarded = %discarded.display(),
                    "Duplicate hypha name"
                );
                self.report.push(ScanWarning::DuplicateName {
                    hypha: slot.key().clone(),
                    kept,
                    discarded,
                });
            }
        }
    }

    fn link_children(&mut self) {
        let mut links: Vec<(String, String)> = self
            .hyphae
            .values()
            .filter_map(|hypha| {
                let parent = hypha.parent_name()?;
                self.hyphae
                    .contains_key(parent)
                    .then(|| (parent.to_string(), hypha.full_name.clone()))
            })
            .collect();
        links.sort();

        for (parent, child) in links {
            if let Some(parent) = self.hyphae.get_mut(&parent) {
                parent.children.push(child);
            }
        }
    }
}
