//! Root-local config file source: <root>/.hyphae/config.toml and <root>/.hyphae/{env}.toml

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::{Path, PathBuf};

/// Directory under the wiki root holding root-local configuration.
pub const ROOT_CONFIG_DIR: &str = ".hyphae";

/// Root-local config files in precedence order (base, then environment-specific).
pub fn root_config_paths(root: &Path) -> Vec<PathBuf> {
    let config_dir = root.join(ROOT_CONFIG_DIR);
    let env_name = std::env::var("HYPHAE_ENV").unwrap_or_else(|_| "development".to_string());
    vec![
        config_dir.join("config.toml"),
        config_dir.join(format!("{}.toml", env_name)),
    ]
}

/// Add root-local config files to builder.
/// Precedence: .hyphae/config.toml (base) then .hyphae/{HYPHAE_ENV}.toml (env-specific).
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let mut builder = builder;

    for path in root_config_paths(root) {
        if path.exists() {
            builder = builder.add_source(File::from(path.as_path()).required(false));
        }
    }

    Ok(builder)
}
