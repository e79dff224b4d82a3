//! Configuration System
//!
//! Layered configuration for scanning and logging. Sources, lowest to highest
//! precedence: built-in defaults, the global file
//! (`$XDG_CONFIG_HOME/hyphae/config.toml`), then the root-local files
//! `<root>/.hyphae/config.toml` and `<root>/.hyphae/{HYPHAE_ENV}.toml`.
//! An explicit file given with `--config` replaces the global and root-local
//! layers.

use crate::logging::LoggingConfig;
use crate::store::{AssemblyPolicy, DuplicatePolicy, MissingFilesPolicy};
use crate::tree::walker::WalkerConfig;
use config::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod merge;
mod sources;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HyphaeConfig {
    /// Scan settings
    #[serde(default)]
    pub scan: ScanConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How the wiki tree is scanned and assembled
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanConfig {
    /// Follow symbolic links while listing directories
    #[serde(default)]
    pub follow_symlinks: bool,

    /// Entry names skipped in every directory
    #[serde(default = "default_ignore")]
    pub ignore: Vec<String>,

    /// Maximum depth of nested hyphae to scan (unset = unlimited)
    #[serde(default)]
    pub max_depth: Option<usize>,

    /// Scan sibling subtrees in parallel
    #[serde(default)]
    pub parallel: bool,

    /// Declared revisions without any file on disk: keep or drop
    #[serde(default)]
    pub missing_revision_files: MissingFilesPolicy,

    /// Two directories with the same hypha name: overwrite or keep_first
    #[serde(default)]
    pub duplicate_names: DuplicatePolicy,
}

fn default_ignore() -> Vec<String> {
    WalkerConfig::default().ignore_patterns
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            ignore: default_ignore(),
            max_depth: None,
            parallel: false,
            missing_revision_files: MissingFilesPolicy::default(),
            duplicate_names: DuplicatePolicy::default(),
        }
    }
}

impl ScanConfig {
    pub fn walker_config(&self) -> WalkerConfig {
        WalkerConfig {
            ignore_patterns: self.ignore.clone(),
            max_depth: self.max_depth,
            parallel: self.parallel,
        }
    }

    pub fn assembly_policy(&self) -> AssemblyPolicy {
        AssemblyPolicy {
            missing_revision_files: self.missing_revision_files,
            duplicate_names: self.duplicate_names,
        }
    }

    /// Validate scan configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_depth == Some(0) {
            return Err("max_depth must be at least 1 (unset it for unlimited depth)".to_string());
        }
        if self.ignore.iter().any(|entry| entry.trim().is_empty()) {
            return Err("ignore entries cannot be empty".to_string());
        }
        if let Some(entry) = self.ignore.iter().find(|entry| entry.contains('/')) {
            return Err(format!(
                "ignore entry '{}' must be a single name, not a path",
                entry
            ));
        }
        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Scan(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Scan(msg) => write!(f, "Scan: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl HyphaeConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.scan.validate() {
            errors.push(ValidationError::Scan(e));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Loads [`HyphaeConfig`] from layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for the wiki rooted at `root`.
    pub fn load(root: &Path) -> Result<HyphaeConfig, ConfigError> {
        let builder = merge::merge_policy::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder)?;
        let builder = sources::root_file::add_to_builder(builder, root)?;
        builder.build()?.try_deserialize()
    }

    /// Load configuration from a single explicit file on top of the defaults.
    pub fn load_from_file(path: &Path) -> Result<HyphaeConfig, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        merge::merge_policy::builder_with_defaults()?
            .add_source(config::File::from(path).required(true))
            .build()?
            .try_deserialize()
    }

    /// Path of the global configuration file, if a home directory is known.
    pub fn global_config_path() -> Option<PathBuf> {
        sources::global_file::global_config_path()
    }
}
