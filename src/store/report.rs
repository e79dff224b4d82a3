//! Scan report: every recoverable problem met while building the index.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// A recoverable condition encountered during the scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScanWarning {
    /// A sub-hypha directory could not be listed; its subtree was skipped.
    UnreadableDir { path: PathBuf, error: String },
    /// Revision files were found but no `meta.json`.
    MissingMetadata { hypha: String, path: PathBuf },
    /// `meta.json` exists but could not be read or parsed.
    InvalidMetadata {
        hypha: String,
        path: PathBuf,
        error: String,
    },
    /// Files exist for a revision that `meta.json` does not declare.
    UndeclaredRevision {
        hypha: String,
        revision: String,
        paths: Vec<PathBuf>,
    },
    /// A declared revision has no file on disk and was dropped by policy.
    DroppedRevision { hypha: String, revision: String },
    /// Two directories produced the same hypha name.
    DuplicateName {
        hypha: String,
        kept: PathBuf,
        discarded: PathBuf,
    },
    /// Revision files directly in the wiki root are never a hypha.
    RootRevisions { path: PathBuf },
    /// A followed symlink leads back to one of its own ancestors; not descended.
    SymlinkLoop { path: PathBuf, target: PathBuf },
}

impl fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanWarning::UnreadableDir { path, error } => {
                write!(f, "{}: unreadable directory skipped ({})", path.display(), error)
            }
            ScanWarning::MissingMetadata { hypha, path } => write!(
                f,
                "{}: no meta.json in {}; hypha skipped",
                hypha,
                path.display()
            ),
            ScanWarning::InvalidMetadata { hypha, path, error } => write!(
                f,
                "{}: invalid {} ({}); hypha skipped",
                hypha,
                path.display(),
                error
            ),
            ScanWarning::UndeclaredRevision {
                hypha,
                revision,
                paths,
            } => {
                let paths: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
                write!(
                    f,
                    "{}: meta.json declares no revision {}; files {} skipped",
                    hypha,
                    revision,
                    paths.join(", ")
                )
            }
            ScanWarning::DroppedRevision { hypha, revision } => write!(
                f,
                "{}: revision {} has no files on disk; dropped",
                hypha, revision
            ),
            ScanWarning::DuplicateName {
                hypha,
                kept,
                discarded,
            } => write!(
                f,
                "{}: name collision, kept {} and discarded {}",
                hypha,
                kept.display(),
                discarded.display()
            ),
            ScanWarning::RootRevisions { path } => write!(
                f,
                "{}: revision files in the wiki root are ignored",
                path.display()
            ),
            ScanWarning::SymlinkLoop { path, target } => write!(
                f,
                "{}: loops back to {}; not descended",
                path.display(),
                target.display()
            ),
        }
    }
}

/// Warnings collected during one scan, in visitation order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub warnings: Vec<ScanWarning>,
    /// Directories visited, including unreadable ones
    pub dirs_scanned: usize,
}

impl ScanReport {
    pub fn push(&mut self, warning: ScanWarning) {
        self.warnings.push(warning);
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Undeclared-revision warnings for one hypha.
    pub fn undeclared_revisions<'a>(
        &'a self,
        hypha: &'a str,
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.warnings.iter().filter_map(move |w| match w {
            ScanWarning::UndeclaredRevision {
                hypha: h, revision, ..
            } if h == hypha => Some(revision.as_str()),
            _ => None,
        })
    }
}
