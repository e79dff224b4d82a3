//! Recursive walker producing a tree of directory scans
//!
//! The walk is pure: it reads through a [`DirSource`] and returns a
//! [`ScanNode`] tree without touching the index. Assembly into hyphae is a
//! separate reduction over that tree (see `store::assembler`).

use crate::error::StorageError;
use crate::tree::scanner::{scan_dir, DirScan};
use crate::tree::source::DirSource;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Walker configuration
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Entry names skipped in every directory (e.g. ".git")
    pub ignore_patterns: Vec<String>,
    /// Maximum depth of sub-hypha directories to scan (None = unlimited)
    pub max_depth: Option<usize>,
    /// Scan sibling subtrees on the rayon thread pool
    pub parallel: bool,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            ignore_patterns: vec![".git".to_string(), ".hyphae".to_string()],
            max_depth: None,
            parallel: false,
        }
    }
}

/// A sub-hypha candidate that resolves to a directory already on the current branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopedDir {
    pub path: PathBuf,
    /// Canonical directory the candidate leads back to
    pub target: PathBuf,
}

/// One scanned directory and its scanned sub-hypha candidates
#[derive(Debug)]
pub struct ScanNode {
    pub path: PathBuf,
    /// Depth below the root (root = 0)
    pub depth: usize,
    /// Scan result; an unreadable directory has no children
    pub scan: Result<DirScan, StorageError>,
    /// Scans of the sub-hypha candidates, in sorted path order
    pub children: Vec<ScanNode>,
    /// Candidates skipped because they loop back to an ancestor
    pub loops: Vec<LoopedDir>,
}

impl ScanNode {
    /// Visit this node and all descendants, children before parents.
    pub fn visit_post_order<'a>(&'a self, f: &mut impl FnMut(&'a ScanNode)) {
        for child in &self.children {
            child.visit_post_order(f);
        }
        f(self);
    }

    /// Number of directories in this subtree, including unreadable ones.
    pub fn dir_count(&self) -> usize {
        1 + self.children.iter().map(ScanNode::dir_count).sum::<usize>()
    }
}

/// Filesystem walker
pub struct Walker<'a> {
    source: &'a dyn DirSource,
    config: WalkerConfig,
}

impl<'a> Walker<'a> {
    /// Create a new walker over the given source
    pub fn new(source: &'a dyn DirSource) -> Self {
        Self {
            source,
            config: WalkerConfig::default(),
        }
    }

    /// Create a walker with custom configuration
    pub fn with_config(source: &'a dyn DirSource, config: WalkerConfig) -> Self {
        Self { source, config }
    }

    /// Walk the tree below `root`.
    ///
    /// An unreadable root is fatal; unreadable subtrees are kept in the result
    /// as failed nodes so the caller can report them.
    #[instrument(skip(self), fields(root = %root.display()))]
    pub fn walk(&self, root: &Path) -> Result<ScanNode, StorageError> {
        let scan = scan_dir(self.source, root, &self.config.ignore_patterns).map_err(|e| {
            match e {
                StorageError::DirUnreadable { path, source } => {
                    StorageError::RootUnreadable { path, source }
                }
                other => other,
            }
        })?;

        let branch = vec![self.source.canonical_dir(root)];
        let (children, loops) = self.walk_children(&scan, 0, &branch);
        Ok(ScanNode {
            path: root.to_path_buf(),
            depth: 0,
            scan: Ok(scan),
            children,
            loops,
        })
    }

    /// `branch` holds the canonical directories from the root down to `path`, inclusive.
    fn walk_node(&self, path: &Path, depth: usize, branch: &[PathBuf]) -> ScanNode {
        let scan = scan_dir(self.source, path, &self.config.ignore_patterns);
        let (children, loops) = match &scan {
            Ok(scan) => self.walk_children(scan, depth, branch),
            Err(_) => (Vec::new(), Vec::new()),
        };
        ScanNode {
            path: path.to_path_buf(),
            depth,
            scan,
            children,
            loops,
        }
    }

    fn walk_children(
        &self,
        scan: &DirScan,
        depth: usize,
        branch: &[PathBuf],
    ) -> (Vec<ScanNode>, Vec<LoopedDir>) {
        let child_depth = depth + 1;
        if self.config.max_depth.is_some_and(|max| child_depth > max) {
            if !scan.subhyphae.is_empty() {
                debug!(
                    dir = %scan.path.display(),
                    skipped = scan.subhyphae.len(),
                    "Maximum depth reached; not descending"
                );
            }
            return (Vec::new(), Vec::new());
        }

        let mut loops = Vec::new();
        let mut candidates = Vec::with_capacity(scan.subhyphae.len());
        for path in &scan.subhyphae {
            let canonical = self.source.canonical_dir(path);
            if branch.contains(&canonical) {
                debug!(
                    dir = %path.display(),
                    target = %canonical.display(),
                    "Directory loops back to an ancestor; not descending"
                );
                loops.push(LoopedDir {
                    path: path.clone(),
                    target: canonical,
                });
            } else {
                candidates.push((path, canonical));
            }
        }

        let visit = |(path, canonical): &(&PathBuf, PathBuf)| {
            let mut child_branch = branch.to_vec();
            child_branch.push(canonical.clone());
            self.walk_node(path, child_depth, &child_branch)
        };
        let children = if self.config.parallel {
            candidates.par_iter().map(visit).collect()
        } else {
            candidates.iter().map(visit).collect()
        };
        (children, loops)
    }
}
