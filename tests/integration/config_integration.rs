//! Integration tests for Configuration System

use super::test_utils::{meta_declaring, with_xdg_env, write_hypha};
use hyphae::config::{ConfigLoader, ScanConfig};
use hyphae::store::{DuplicatePolicy, HyphaIndex, MissingFilesPolicy};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_root_local_config_drives_scan() {
    let xdg = TempDir::new().unwrap();
    with_xdg_env(&xdg, || {
        let wiki = TempDir::new().unwrap();
        write_hypha(wiki.path(), "keep", &[("1.txt", "x")], Some(&meta_declaring(&["1"])));
        write_hypha(wiki.path(), "skip", &[("1.txt", "x")], Some(&meta_declaring(&["1"])));

        let config_dir = wiki.path().join(".hyphae");
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(
            config_dir.join("config.toml"),
            "[scan]\nignore = [\".hyphae\", \"skip\"]\n",
        )
        .unwrap();

        let config = ConfigLoader::load(wiki.path()).unwrap();
        assert!(config.validate().is_ok());
        let index = HyphaIndex::init(wiki.path(), &config.scan).unwrap();
        assert_eq!(index.names(), vec!["keep"]);
    });
}

#[test]
fn test_environment_file_overrides_base_file() {
    let xdg = TempDir::new().unwrap();
    with_xdg_env(&xdg, || {
        let wiki = TempDir::new().unwrap();
        let config_dir = wiki.path().join(".hyphae");
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(
            config_dir.join("config.toml"),
            "[scan]\nmissing_revision_files = \"drop\"\nparallel = true\n",
        )
        .unwrap();
        fs::write(
            config_dir.join("staging.toml"),
            "[scan]\nparallel = false\n",
        )
        .unwrap();

        std::env::set_var("HYPHAE_ENV", "staging");
        let config = ConfigLoader::load(wiki.path()).unwrap();
        assert_eq!(config.scan.missing_revision_files, MissingFilesPolicy::Drop);
        assert!(!config.scan.parallel);
    });
}

#[test]
fn test_global_config_is_read_from_xdg_config_home() {
    let xdg = TempDir::new().unwrap();
    with_xdg_env(&xdg, || {
        let global_dir = xdg.path().join("hyphae");
        fs::create_dir_all(&global_dir).unwrap();
        fs::write(
            global_dir.join("config.toml"),
            "[scan]\nduplicate_names = \"keep_first\"\n\n[logging]\nlevel = \"warn\"\n",
        )
        .unwrap();

        assert_eq!(
            ConfigLoader::global_config_path(),
            Some(global_dir.join("config.toml"))
        );

        let wiki = TempDir::new().unwrap();
        let config = ConfigLoader::load(wiki.path()).unwrap();
        assert_eq!(config.scan.duplicate_names, DuplicatePolicy::KeepFirst);
        assert_eq!(config.logging.level, "warn");
    });
}

#[test]
fn test_explicit_file_ignores_root_local_config() {
    let xdg = TempDir::new().unwrap();
    with_xdg_env(&xdg, || {
        let wiki = TempDir::new().unwrap();
        let config_dir = wiki.path().join(".hyphae");
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join("config.toml"), "[scan]\nparallel = true\n").unwrap();

        let explicit = wiki.path().join("explicit.toml");
        fs::write(&explicit, "[scan]\nmax_depth = 3\n").unwrap();

        let config = ConfigLoader::load_from_file(&explicit).unwrap();
        assert!(!config.scan.parallel);
        assert_eq!(config.scan.max_depth, Some(3));
    });
}

#[test]
fn test_invalid_values_fail_validation() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("bad.toml");
    fs::write(
        &config_file,
        "[scan]\nmax_depth = 0\n\n[logging]\nformat = \"xml\"\n",
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(&config_file).unwrap();
    let errors = config.validate().unwrap_err();
    assert_eq!(errors.len(), 2);
}

#[test]
fn test_unknown_policy_value_fails_to_load() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("bad.toml");
    fs::write(&config_file, "[scan]\nduplicate_names = \"merge\"\n").unwrap();
    assert!(ConfigLoader::load_from_file(&config_file).is_err());
}

#[test]
fn test_default_scan_config_matches_documented_defaults() {
    let config = ScanConfig::default();
    assert!(!config.follow_symlinks);
    assert_eq!(config.ignore, vec![".git".to_string(), ".hyphae".to_string()]);
    assert_eq!(config.max_depth, None);
    assert!(!config.parallel);
}
