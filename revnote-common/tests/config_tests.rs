//! Unit tests for configuration resolution
//!
//! Covers the priority order CLI > environment > TOML file > defaults.
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate REVNOTE_* variables are marked with #[serial].

use revnote_common::config::{
    load_toml_config, ConfigOverrides, ServiceConfig, TomlConfig, ENV_BIND, ENV_DATABASE,
    ENV_LOG, ENV_SOURCE,
};
use serial_test::serial;
use std::collections::HashMap;
use std::env;
use std::io::Write;
use std::path::PathBuf;

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn test_defaults_match_original_layout() {
    let config =
        ServiceConfig::resolve_layers(&ConfigOverrides::default(), no_env, TomlConfig::default());

    assert_eq!(config.database_path, PathBuf::from("comments.db"));
    assert_eq!(config.source_path, PathBuf::from("comments.csv"));
    assert_eq!(config.bind_address, "127.0.0.1:5000");
    assert_eq!(config.log_level, "info");
}

#[test]
fn test_file_overrides_defaults() {
    let file = TomlConfig {
        database: Some(PathBuf::from("/srv/revnote/review.db")),
        bind: Some("0.0.0.0:8080".to_string()),
        ..Default::default()
    };

    let config = ServiceConfig::resolve_layers(&ConfigOverrides::default(), no_env, file);

    assert_eq!(config.database_path, PathBuf::from("/srv/revnote/review.db"));
    assert_eq!(config.bind_address, "0.0.0.0:8080");
    assert_eq!(config.source_path, PathBuf::from("comments.csv"));
}

#[test]
fn test_env_overrides_file() {
    let vars: HashMap<&str, &str> = [(ENV_SOURCE, "/data/seed.csv"), (ENV_LOG, "debug")]
        .into_iter()
        .collect();
    let file = TomlConfig {
        source: Some(PathBuf::from("/from/file.csv")),
        log_level: Some("warn".to_string()),
        ..Default::default()
    };

    let config = ServiceConfig::resolve_layers(
        &ConfigOverrides::default(),
        |key| vars.get(key).map(|v| v.to_string()),
        file,
    );

    assert_eq!(config.source_path, PathBuf::from("/data/seed.csv"));
    assert_eq!(config.log_level, "debug");
}

#[test]
fn test_cli_overrides_everything() {
    let overrides = ConfigOverrides {
        bind: Some("127.0.0.1:9999".to_string()),
        ..Default::default()
    };
    let file = TomlConfig {
        bind: Some("0.0.0.0:8080".to_string()),
        ..Default::default()
    };

    let config = ServiceConfig::resolve_layers(
        &overrides,
        |key| (key == ENV_BIND).then(|| "10.0.0.1:1".to_string()),
        file,
    );

    assert_eq!(config.bind_address, "127.0.0.1:9999");
}

#[test]
fn test_load_toml_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "database = \"/tmp/review.db\"").unwrap();
    writeln!(file, "bind = \"0.0.0.0:5001\"").unwrap();

    let config = load_toml_config(file.path()).unwrap();

    assert_eq!(config.database, Some(PathBuf::from("/tmp/review.db")));
    assert_eq!(config.bind.as_deref(), Some("0.0.0.0:5001"));
    assert!(config.source.is_none());
}

#[test]
fn test_explicit_missing_config_file_is_error() {
    let overrides = ConfigOverrides {
        config_file: Some(PathBuf::from("/nonexistent/revnote/config.toml")),
        ..Default::default()
    };

    let result = ServiceConfig::resolve(&overrides);
    assert!(result.is_err(), "Explicit config file must exist");
}

#[test]
fn test_malformed_config_file_is_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "database = [not toml").unwrap();

    assert!(load_toml_config(file.path()).is_err());
}

#[test]
#[serial]
fn test_resolve_reads_process_environment() {
    env::set_var(ENV_DATABASE, "/tmp/revnote-env-test.db");
    env::remove_var(ENV_BIND);

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "database = \"/from/file.db\"").unwrap();

    let overrides = ConfigOverrides {
        config_file: Some(file.path().to_path_buf()),
        ..Default::default()
    };
    let config = ServiceConfig::resolve(&overrides).unwrap();

    assert_eq!(config.database_path, PathBuf::from("/tmp/revnote-env-test.db"));
    assert_eq!(config.bind_address, "127.0.0.1:5000");

    env::remove_var(ENV_DATABASE);
}
