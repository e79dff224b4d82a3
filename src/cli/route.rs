//! CLI route: single route table and run context. Dispatches to the index and presentation.

use crate::cli::command_name;
use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_hypha_list_json, format_hypha_list_text, format_revision_json, format_revision_text,
    format_scan_summary_json, format_scan_summary_text,
};
use crate::config::{ConfigLoader, HyphaeConfig};
use crate::error::ApiError;
use crate::store::{Hypha, HyphaIndex, Revision};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info_span};

/// Runtime context for CLI execution: the built index.
/// Built from the wiki root and optional config path using ConfigLoader only.
pub struct RunContext {
    index: Arc<HyphaIndex>,
}

impl RunContext {
    /// Load configuration, validate it and scan the wiki root.
    pub fn new(root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = load_config(&root, config_path.as_ref())?;
        let index = HyphaIndex::init(&root, &config.scan)?;
        Ok(Self {
            index: Arc::new(index),
        })
    }

    /// Wrap an index that was built elsewhere.
    pub fn from_index(index: Arc<HyphaIndex>) -> Self {
        Self { index }
    }

    /// Shared handle to the index.
    pub fn index(&self) -> Arc<HyphaIndex> {
        Arc::clone(&self.index)
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let name = command_name(command);
        let _span = info_span!("command", command = name).entered();
        let started = Instant::now();
        let result = self.execute_inner(command);
        debug!(
            ok = result.is_ok(),
            duration_ms = started.elapsed().as_millis(),
            "Command finished"
        );
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Scan { format } => {
                if format == "json" {
                    format_scan_summary_json(&self.index)
                } else {
                    Ok(format_scan_summary_text(&self.index))
                }
            }
            Commands::List { format } => {
                if format == "json" {
                    format_hypha_list_json(&self.index)
                } else {
                    Ok(format_hypha_list_text(&self.index))
                }
            }
            Commands::Show { hypha, rev, format } => {
                let (hypha, revision) = self.resolve_revision(hypha, rev.as_deref())?;
                if format == "json" {
                    format_revision_json(hypha, revision)
                } else {
                    Ok(format_revision_text(hypha, revision))
                }
            }
            Commands::Raw { hypha, rev } => {
                let (_, revision) = self.resolve_revision(hypha, rev.as_deref())?;
                Ok(revision.read_text()?)
            }
        }
    }

    /// Find a hypha and one of its revisions; the newest one when `rev` is None.
    fn resolve_revision(
        &self,
        name: &str,
        rev: Option<&str>,
    ) -> Result<(&Hypha, &Revision), ApiError> {
        let hypha = self
            .index
            .lookup(name)
            .ok_or_else(|| ApiError::HyphaNotFound(name.to_string()))?;
        let revision = match rev {
            Some(id) => hypha
                .revision(id)
                .ok_or_else(|| ApiError::RevisionNotFound {
                    hypha: hypha.full_name.clone(),
                    revision: id.to_string(),
                })?,
            None => hypha
                .newest_revision()
                .ok_or_else(|| ApiError::NoRevisions(hypha.full_name.clone()))?,
        };
        Ok((hypha, revision))
    }
}

/// Load and validate configuration for `root`.
pub(crate) fn load_config(
    root: &Path,
    config_path: Option<&PathBuf>,
) -> Result<HyphaeConfig, ApiError> {
    let config = match config_path {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load(root)?,
    };
    config.validate().map_err(|errors| {
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        ApiError::ConfigError(messages.join("; "))
    })?;
    Ok(config)
}
