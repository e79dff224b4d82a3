//! Integration tests for index construction from on-disk wiki trees

use super::test_utils::{meta_declaring, write_hypha};
use hyphae::config::ScanConfig;
use hyphae::store::{DuplicatePolicy, HyphaIndex, MissingFilesPolicy, ScanWarning};
use hyphae::StorageError;
use std::fs;
use tempfile::TempDir;

fn build(root: &std::path::Path) -> HyphaIndex {
    HyphaIndex::init(root, &ScanConfig::default()).unwrap()
}

/// alpha/1.txt with meta.json declaring "1" as text/plain
#[test]
fn test_alpha_scenario() {
    let temp_dir = TempDir::new().unwrap();
    write_hypha(
        temp_dir.path(),
        "alpha",
        &[("1.txt", "hello")],
        Some(r#"{"revisions": {"1": {"text_mime": "text/plain", "author": "ana"}}}"#),
    );

    let index = build(temp_dir.path());
    let revision = index.lookup_revision("alpha", "1").unwrap();
    assert_eq!(revision.text_mime, "text/plain");
    assert_eq!(revision.author, "ana");
    assert_eq!(
        revision.text_path.as_deref(),
        Some(index.root().join("alpha").join("1.txt").as_path())
    );
    assert_eq!(revision.read_text().unwrap(), "hello");
    assert!(index.lookup_revision("alpha", "2").is_none());
    assert!(index.report().is_clean());
}

/// beta/1.txt without meta.json is never indexed
#[test]
fn test_beta_without_metadata_is_skipped() {
    let temp_dir = TempDir::new().unwrap();
    write_hypha(temp_dir.path(), "beta", &[("1.txt", "hello")], None);

    let index = build(temp_dir.path());
    assert!(index.lookup("beta").is_none());
    assert!(index.is_empty());
    assert!(index
        .report()
        .warnings
        .iter()
        .any(|w| matches!(w, ScanWarning::MissingMetadata { hypha, .. } if hypha == "beta")));
}

#[test]
fn test_reserved_revision_only_is_never_indexed() {
    let temp_dir = TempDir::new().unwrap();
    write_hypha(
        temp_dir.path(),
        "zero",
        &[("0.txt", "text"), ("0.bin", "bytes")],
        Some(&meta_declaring(&["0"])),
    );

    let index = build(temp_dir.path());
    assert!(index.lookup("zero").is_none());
}

#[test]
fn test_undeclared_revision_is_skipped_with_warning() {
    let temp_dir = TempDir::new().unwrap();
    write_hypha(
        temp_dir.path(),
        "gamma",
        &[("1.txt", "one"), ("2.txt", "two"), ("2.bin", "two bytes")],
        Some(&meta_declaring(&["1"])),
    );

    let index = build(temp_dir.path());
    let gamma = index.lookup("gamma").unwrap();
    assert_eq!(gamma.revisions.keys().collect::<Vec<_>>(), vec!["1"]);
    assert_eq!(
        index.report().undeclared_revisions("gamma").collect::<Vec<_>>(),
        vec!["2"]
    );
    let paths = index
        .report()
        .warnings
        .iter()
        .find_map(|w| match w {
            ScanWarning::UndeclaredRevision { paths, .. } => Some(paths.len()),
            _ => None,
        })
        .unwrap();
    assert_eq!(paths, 2);
}

#[test]
fn test_invalid_metadata_skips_only_that_hypha() {
    let temp_dir = TempDir::new().unwrap();
    write_hypha(temp_dir.path(), "broken", &[("1.txt", "x")], Some("{ not json"));
    write_hypha(
        temp_dir.path(),
        "fine",
        &[("1.txt", "x")],
        Some(&meta_declaring(&["1"])),
    );

    let index = build(temp_dir.path());
    assert!(index.lookup("broken").is_none());
    assert!(index.lookup("fine").is_some());
    assert!(index
        .report()
        .warnings
        .iter()
        .any(|w| matches!(w, ScanWarning::InvalidMetadata { hypha, .. } if hypha == "broken")));
}

#[test]
fn test_binary_payloads_and_mime_clearing() {
    let temp_dir = TempDir::new().unwrap();
    write_hypha(
        temp_dir.path(),
        "media",
        &[("1.txt", "caption"), ("1.bin", "png"), ("2.txt", "text only")],
        Some(
            r#"{"revisions": {
                "1": {"binary_mime": "image/png"},
                "2": {"binary_mime": "image/png"}
            }}"#,
        ),
    );

    let index = build(temp_dir.path());
    let first = index.lookup_revision("media", "1").unwrap();
    assert!(first.has_binary_data());
    assert_eq!(first.read_binary().unwrap(), b"png");

    let second = index.lookup_revision("media", "2").unwrap();
    assert!(!second.has_binary_data());
    assert_eq!(second.binary_mime, "");
    assert!(matches!(
        second.read_binary(),
        Err(StorageError::MissingPayload { .. })
    ));
}

#[test]
fn test_declared_revision_without_files_policy() {
    let temp_dir = TempDir::new().unwrap();
    write_hypha(
        temp_dir.path(),
        "sparse",
        &[("1.txt", "one")],
        Some(&meta_declaring(&["1", "5"])),
    );

    let kept = build(temp_dir.path());
    let ghost = kept.lookup_revision("sparse", "5").unwrap();
    assert!(!ghost.has_files());

    let config = ScanConfig {
        missing_revision_files: MissingFilesPolicy::Drop,
        ..Default::default()
    };
    let dropped = HyphaIndex::init(temp_dir.path(), &config).unwrap();
    assert!(dropped.lookup_revision("sparse", "5").is_none());
    assert!(dropped.lookup_revision("sparse", "1").is_some());
    assert!(dropped
        .report()
        .warnings
        .iter()
        .any(|w| matches!(w, ScanWarning::DroppedRevision { revision, .. } if revision == "5")));
}

#[test]
fn test_duplicate_policy_is_accepted_without_collisions() {
    let temp_dir = TempDir::new().unwrap();
    write_hypha(
        temp_dir.path(),
        "solo",
        &[("1.txt", "one")],
        Some(&meta_declaring(&["1"])),
    );
    let config = ScanConfig {
        duplicate_names: DuplicatePolicy::KeepFirst,
        ..Default::default()
    };
    let index = HyphaIndex::init(temp_dir.path(), &config).unwrap();
    assert_eq!(index.names(), vec!["solo"]);
}

#[test]
fn test_unrecognized_entries_are_ignored() {
    let temp_dir = TempDir::new().unwrap();
    let dir = write_hypha(
        temp_dir.path(),
        "delta",
        &[("1.txt", "one"), ("notes.md", "x"), ("1.txt.bak", "x"), ("x1.txt", "x")],
        Some(&meta_declaring(&["1"])),
    );
    fs::create_dir(dir.join("3.txt")).unwrap();

    let index = build(temp_dir.path());
    let delta = index.lookup("delta").unwrap();
    assert_eq!(delta.revisions.len(), 1);
    assert!(index.report().is_clean());
}

#[test]
fn test_newest_revision_is_numeric() {
    let temp_dir = TempDir::new().unwrap();
    write_hypha(
        temp_dir.path(),
        "log",
        &[("2.txt", "b"), ("10.txt", "c"), ("9.txt", "a")],
        Some(&meta_declaring(&["2", "9", "10"])),
    );

    let index = build(temp_dir.path());
    let newest = index.lookup("log").unwrap().newest_revision().unwrap();
    assert_eq!(newest.id, "10");
    assert_eq!(newest.sequence(), Some(10));
}

#[test]
fn test_rebuild_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    write_hypha(
        temp_dir.path(),
        "alpha",
        &[("1.txt", "one"), ("2.bin", "two")],
        Some(&meta_declaring(&["1", "2"])),
    );
    write_hypha(
        temp_dir.path(),
        "alpha/inner",
        &[("1.txt", "one"), ("4.txt", "four")],
        Some(&meta_declaring(&["1"])),
    );

    assert_eq!(build(temp_dir.path()), build(temp_dir.path()));
}

#[test]
fn test_missing_root_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("does-not-exist");
    let result = HyphaIndex::init(&missing, &ScanConfig::default());
    assert!(matches!(result, Err(StorageError::RootUnreadable { .. })));
}

#[test]
fn test_root_that_is_a_file_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("plain.txt");
    fs::write(&file, "x").unwrap();
    assert!(HyphaIndex::init(&file, &ScanConfig::default()).is_err());
}

#[test]
fn test_revision_files_in_root_are_not_a_hypha() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("1.txt"), "root text").unwrap();
    fs::write(temp_dir.path().join("meta.json"), meta_declaring(&["1"])).unwrap();

    let index = build(temp_dir.path());
    assert!(index.is_empty());
    assert!(index
        .report()
        .warnings
        .iter()
        .any(|w| matches!(w, ScanWarning::RootRevisions { .. })));
}
