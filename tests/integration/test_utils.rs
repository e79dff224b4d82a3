//! Shared test utilities for integration tests
//!
//! Fixture builders for on-disk wiki trees, plus serialized setup/teardown of
//! the XDG environment so that a developer's own global config never leaks
//! into a test.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

/// Global mutex to serialize XDG environment variable access across all tests
static XDG_ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Environment variable state to restore after test
struct EnvState {
    home: Option<String>,
    xdg_config_home: Option<String>,
    hyphae_env: Option<String>,
}

impl EnvState {
    fn capture() -> Self {
        Self {
            home: std::env::var("HOME").ok(),
            xdg_config_home: std::env::var("XDG_CONFIG_HOME").ok(),
            hyphae_env: std::env::var("HYPHAE_ENV").ok(),
        }
    }

    fn restore(self) {
        restore_var("HOME", self.home);
        restore_var("XDG_CONFIG_HOME", self.xdg_config_home);
        restore_var("HYPHAE_ENV", self.hyphae_env);
    }
}

fn restore_var(key: &str, value: Option<String>) {
    match value {
        Some(orig) => std::env::set_var(key, orig),
        None => std::env::remove_var(key),
    }
}

/// Run `f` with HOME and XDG_CONFIG_HOME pointing into `test_dir`.
///
/// The global config file then lives at `<test_dir>/hyphae/config.toml`.
pub fn with_xdg_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = XDG_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let env_state = EnvState::capture();

    let test_home = test_dir.path().join("home");
    fs::create_dir_all(&test_home).unwrap();

    std::env::set_var("HOME", &test_home);
    std::env::set_var("XDG_CONFIG_HOME", test_dir.path());
    std::env::remove_var("HYPHAE_ENV");

    let result = f();

    env_state.restore();

    result
}

/// Write one hypha directory under `root`.
///
/// `files` are `(file name, contents)` pairs; `meta` is written verbatim as
/// `meta.json` when given.
pub fn write_hypha(root: &Path, name: &str, files: &[(&str, &str)], meta: Option<&str>) -> PathBuf {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    for (file, contents) in files {
        fs::write(dir.join(file), contents).unwrap();
    }
    if let Some(meta) = meta {
        fs::write(dir.join("meta.json"), meta).unwrap();
    }
    dir
}

/// `meta.json` declaring the given revision ids with empty fields.
pub fn meta_declaring(ids: &[&str]) -> String {
    let revisions: Vec<String> = ids.iter().map(|id| format!("\"{}\": {{}}", id)).collect();
    format!("{{\"revisions\": {{{}}}}}", revisions.join(", "))
}
