//! Unit tests for configuration resolution and graceful degradation
//!
//! Tests cover:
//! - Missing TOML files SHALL NOT cause termination
//! - Priority order: CLI argument > MMG_CONFIG > default location
//! - Malformed TOML is reported as a configuration error
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate MMG_CONFIG are marked with #[serial].

use mmg_common::config::{resolve_config_path, TomlConfig, CONFIG_ENV_VAR};
use mmg_common::Error;
use serial_test::serial;
use std::env;
use std::io::Write;
use std::path::PathBuf;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist.toml");

    let config = TomlConfig::load(&missing).expect("missing file must not be fatal");
    assert_eq!(config, TomlConfig::default());
}

#[test]
fn test_full_file_is_loaded() {
    let file = write_config(
        r#"
        port = 6100
        bind_address = "0.0.0.0"

        [catalog]
        url = "http://localhost:9000/movies"
        probe_timeout_ms = 1500
        fetch_timeout_ms = 3000
        min_required = 6

        [game]
        number_of_cards = 3
        number_of_movies = 6

        [logging]
        level = "debug"
        "#,
    );

    let config = TomlConfig::load(file.path()).unwrap();
    assert_eq!(config.port, 6100);
    assert_eq!(config.bind_address, "0.0.0.0");
    assert_eq!(config.catalog.url, "http://localhost:9000/movies");
    assert_eq!(config.catalog.probe_timeout_ms, 1500);
    assert_eq!(config.catalog.fetch_timeout_ms, 3000);
    assert_eq!(config.catalog.min_required, 6);
    assert_eq!(config.game.number_of_cards, 3);
    assert_eq!(config.game.number_of_movies, 6);
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_malformed_file_is_config_error() {
    let file = write_config("[catalog\nurl = ");
    let err = TomlConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, Error::Config(_)), "got {:?}", err);
}

#[test]
#[serial]
fn test_cli_argument_beats_environment() {
    env::set_var(CONFIG_ENV_VAR, "/tmp/mmg-from-env.toml");

    let cli = PathBuf::from("/tmp/mmg-from-cli.toml");
    let resolved = resolve_config_path(Some(&cli));
    assert_eq!(resolved, Some(cli));

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_environment_variable_used_without_cli() {
    env::set_var(CONFIG_ENV_VAR, "/tmp/mmg-from-env.toml");

    let resolved = resolve_config_path(None);
    assert_eq!(resolved, Some(PathBuf::from("/tmp/mmg-from-env.toml")));

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_resolve_reads_file_named_by_environment() {
    let file = write_config("port = 6200\n");
    env::set_var(CONFIG_ENV_VAR, file.path());

    let config = TomlConfig::resolve(None).unwrap();
    assert_eq!(config.port, 6200);

    env::remove_var(CONFIG_ENV_VAR);
}
