//! Path canonicalization and hypha naming utilities

use crate::error::StorageError;
use std::path::{Component, Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

/// Canonicalize the wiki root
///
/// Resolves symlinks, `..` and `.` and removes trailing slashes (except root).
/// The result is used as the prefix stripped from every hypha path, so it must
/// name a directory that exists.
pub fn canonicalize_root(path: &Path) -> Result<PathBuf, StorageError> {
    // Use dunce for cross-platform canonicalization
    let canonical = dunce::canonicalize(path).map_err(|e| StorageError::RootUnreadable {
        path: path.to_path_buf(),
        source: e,
    })?;

    if !canonical.is_dir() {
        return Err(StorageError::InvalidPath(format!(
            "Wiki root {} is not a directory",
            canonical.display()
        )));
    }

    let mut path_str = canonical.to_string_lossy().to_string();
    if path_str.len() > 1 {
        while path_str.ends_with('/') || path_str.ends_with('\\') {
            path_str.pop();
        }
    }

    Ok(PathBuf::from(path_str))
}

/// Normalize a hypha name
///
/// Unicode is normalized to NFC and trailing slashes are removed, so names
/// read from different filesystems compare equal.
pub fn normalize_name(name: &str) -> String {
    let mut result: String = name.nfc().collect();
    while result.ends_with('/') {
        result.pop();
    }
    result
}

/// Hypha name of a directory: its path relative to `root`, slash separated.
pub fn hypha_name(root: &Path, dir: &Path) -> Result<String, StorageError> {
    let relative = dir.strip_prefix(root).map_err(|_| {
        StorageError::InvalidPath(format!(
            "{} is not inside wiki root {}",
            dir.display(),
            root.display()
        ))
    })?;

    let mut segments = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(segment) => segments.push(segment.to_string_lossy()),
            other => {
                return Err(StorageError::InvalidPath(format!(
                    "Unexpected component {:?} in {}",
                    other,
                    dir.display()
                )))
            }
        }
    }

    if segments.is_empty() {
        return Err(StorageError::InvalidPath(format!(
            "{} is the wiki root, not a hypha",
            dir.display()
        )));
    }

    Ok(normalize_name(&segments.join("/")))
}

/// Parent hypha name: the directory name of `name`, or None at top level.
pub fn parent_name(name: &str) -> Option<&str> {
    name.rsplit_once('/').map(|(parent, _)| parent)
}
