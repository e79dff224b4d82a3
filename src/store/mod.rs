//! Hypha Index
//!
//! In-memory, read-only index from hypha name to hypha record. It is built
//! exactly once from a wiki root and never mutated afterwards, so it can be
//! shared across threads behind an `Arc` without locking.

pub mod assembler;
pub mod hypha;
pub mod metadata;
pub mod report;

pub use assembler::{AssemblyPolicy, DuplicatePolicy, MissingFilesPolicy};
pub use hypha::{Hypha, Revision};
pub use report::{ScanReport, ScanWarning};

use crate::config::ScanConfig;
use crate::error::StorageError;
use crate::tree::path;
use crate::tree::source::{DirSource, FsSource};
use crate::tree::walker::Walker;
use assembler::Assembler;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, instrument};

/// Read-only index of every hypha under a wiki root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HyphaIndex {
    root: PathBuf,
    hyphae: HashMap<String, Hypha>,
    report: ScanReport,
}

impl HyphaIndex {
    /// Scan the wiki rooted at `root` on the local filesystem.
    ///
    /// Fails only when the root itself cannot be read; every other problem
    /// is logged and recorded in [`HyphaIndex::report`].
    pub fn init(root: &Path, config: &ScanConfig) -> Result<Self, StorageError> {
        let root = path::canonicalize_root(root)?;
        let source = FsSource::new(config.follow_symlinks);
        Self::build(&source, &root, config)
    }

    /// Scan through an arbitrary [`DirSource`]. `root` is used as given.
    #[instrument(skip(source, config), fields(root = %root.display()))]
    pub fn build(
        source: &dyn DirSource,
        root: &Path,
        config: &ScanConfig,
    ) -> Result<Self, StorageError> {
        let start = Instant::now();
        info!("Starting hypha scan");

        let tree = Walker::with_config(source, config.walker_config()).walk(root)?;
        let assembled = Assembler::new(source, root, config.assembly_policy()).assemble(&tree);

        let index = Self {
            root: root.to_path_buf(),
            hyphae: assembled.hyphae,
            report: assembled.report,
        };

        info!(
            hyphae = index.len(),
            revisions = index.revision_count(),
            dirs = index.report.dirs_scanned,
            warnings = index.report.warnings.len(),
            duration_ms = start.elapsed().as_millis(),
            "Hypha scan completed"
        );

        Ok(index)
    }

    /// Look up a hypha by full name.
    pub fn lookup(&self, name: &str) -> Option<&Hypha> {
        match self.hyphae.get(name) {
            Some(hypha) => Some(hypha),
            None if !unicode_normalization::is_nfc(name) => {
                self.hyphae.get(&path::normalize_name(name))
            }
            None => None,
        }
    }

    /// Look up one revision of a hypha. None if either is absent.
    pub fn lookup_revision(&self, name: &str, revision_id: &str) -> Option<&Revision> {
        self.lookup(name)?.revision(revision_id)
    }

    /// The canonical wiki root this index was built from
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Warnings recorded while building
    pub fn report(&self) -> &ScanReport {
        &self.report
    }

    pub fn len(&self) -> usize {
        self.hyphae.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hyphae.is_empty()
    }

    /// All hypha names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.hyphae.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// All hyphae, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = &Hypha> {
        let mut hyphae: Vec<&Hypha> = self.hyphae.values().collect();
        hyphae.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        hyphae.into_iter()
    }

    /// Total number of declared revisions across all hyphae.
    pub fn revision_count(&self) -> usize {
        self.hyphae.values().map(|h| h.revisions.len()).sum()
    }
}
