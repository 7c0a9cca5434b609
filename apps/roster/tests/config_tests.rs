//! Tests for configuration loading and validation.

#![allow(clippy::unwrap_used, clippy::panic)]

use roster::{Config, ConfigError};
use roster_core::MissingRecordPolicy;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

#[test]
fn test_missing_file_yields_defaults() {
    let dir = tempdir().unwrap();
    let config = Config::load(&dir.path().join("absent.toml")).unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.storage.path, PathBuf::from("roster.redb"));
    assert_eq!(config.data.latency_ms, 500);
    assert_eq!(config.data.submit_latency_ms, 1000);
    assert!(!config.data.fail_fetch);
    assert_eq!(config.table.page_size, 10);
    assert_eq!(
        config.stores.missing_record_policy,
        MissingRecordPolicy::Lenient
    );
}

#[test]
fn test_full_file_is_parsed() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("roster.toml");
    std::fs::write(
        &path,
        r#"
[storage]
path = "/var/lib/roster/local.redb"

[data]
latency_ms = 0
submit_latency_ms = 5
fail_fetch = true

[table]
page_size = 25

[stores]
missing_record_policy = "strict"
"#,
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(
        config.storage.path,
        PathBuf::from("/var/lib/roster/local.redb")
    );
    assert_eq!(config.data.latency_ms, 0);
    assert_eq!(config.data.submit_latency_ms, 5);
    assert!(config.data.fail_fetch);
    assert_eq!(config.table.page_size, 25);
    assert_eq!(
        config.stores.missing_record_policy,
        MissingRecordPolicy::Strict
    );
}

#[test]
fn test_partial_sections_keep_defaults() {
    let config = Config::parse("[table]\npage_size = 3\n", Path::new("inline.toml")).unwrap();
    assert_eq!(config.table.page_size, 3);
    assert_eq!(config.data.latency_ms, 500);
}

#[test]
fn test_zero_page_size_is_rejected() {
    let result = Config::parse("[table]\npage_size = 0\n", Path::new("inline.toml"));
    match result {
        Err(ConfigError::ValidationError { message }) => {
            assert!(message.contains("page_size"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn test_unknown_policy_is_a_parse_error() {
    let result = Config::parse(
        "[stores]\nmissing_record_policy = \"loose\"\n",
        Path::new("bad.toml"),
    );
    match result {
        Err(ConfigError::ParseError { path, .. }) => assert_eq!(path, PathBuf::from("bad.toml")),
        other => panic!("expected parse error, got {other:?}"),
    }
}
