//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
///
/// List-valued defaults (e.g. `scan.ignore`) come from the serde defaults of
/// the config types instead, so a file that sets them replaces them whole.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Ok(Config::builder()
        .set_default("scan.follow_symlinks", false)?
        .set_default("scan.parallel", false)?
        .set_default("scan.missing_revision_files", "keep")?
        .set_default("scan.duplicate_names", "overwrite")?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "text")?)
}
