//! Directory listing abstraction
//!
//! The scanner never touches the filesystem directly. It asks a [`DirSource`]
//! for the immediate children of a directory and for the bytes of metadata
//! files, which keeps scanning testable against an in-memory tree.

use crate::error::StorageError;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// One immediate child of a listed directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirNode {
    /// Entry name (last path segment)
    pub name: String,
    /// Full path of the entry
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Read access to a directory tree
pub trait DirSource: Send + Sync {
    /// List the immediate children of `dir`, sorted by name.
    ///
    /// Fails with [`StorageError::DirUnreadable`] when `dir` itself cannot be read.
    fn list_dir(&self, dir: &Path) -> Result<Vec<DirNode>, StorageError>;

    /// Read a whole file.
    fn read_file(&self, path: &Path) -> std::io::Result<Vec<u8>>;

    /// Identity of a directory for loop detection. Two paths that reach the
    /// same directory through symlinks must map to the same value.
    fn canonical_dir(&self, dir: &Path) -> PathBuf {
        dir.to_path_buf()
    }
}

/// [`DirSource`] backed by the local filesystem
#[derive(Debug, Clone, Default)]
pub struct FsSource {
    follow_symlinks: bool,
}

impl FsSource {
    pub fn new(follow_symlinks: bool) -> Self {
        Self { follow_symlinks }
    }
}

impl DirSource for FsSource {
    fn list_dir(&self, dir: &Path) -> Result<Vec<DirNode>, StorageError> {
        let mut nodes = Vec::new();

        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(self.follow_symlinks)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    // Errors about the directory itself end the listing; a bad
                    // child (dangling symlink, permission on one entry) is skipped.
                    let is_dir_error = e.depth() == 0 || e.path().map_or(true, |p| p == dir);
                    if is_dir_error {
                        let source = e.into_io_error().unwrap_or_else(|| {
                            std::io::Error::new(std::io::ErrorKind::Other, "filesystem loop")
                        });
                        return Err(StorageError::DirUnreadable {
                            path: dir.to_path_buf(),
                            source,
                        });
                    }
                    debug!(dir = %dir.display(), error = %e, "Skipping unreadable entry");
                    continue;
                }
            };

            let Some(name) = entry.file_name().to_str() else {
                debug!(path = %entry.path().display(), "Skipping entry with non UTF-8 name");
                continue;
            };

            nodes.push(DirNode {
                name: name.to_string(),
                path: entry.path().to_path_buf(),
                is_dir: entry.file_type().is_dir(),
            });
        }

        Ok(nodes)
    }

    fn read_file(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn canonical_dir(&self, dir: &Path) -> PathBuf {
        if !self.follow_symlinks {
            return dir.to_path_buf();
        }
        dunce::canonicalize(dir).unwrap_or_else(|e| {
            debug!(dir = %dir.display(), error = %e, "Cannot canonicalize directory");
            dir.to_path_buf()
        })
    }
}
