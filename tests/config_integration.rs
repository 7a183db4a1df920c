//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use gdscene::config::AppConfig;
use serial_test::serial;
use std::fs;
use std::path::PathBuf;

fn config_dir(name: &str, default_toml: &str, user_toml: Option<&str>) -> PathBuf {
    let dir = std::env::temp_dir().join("gdscene_config_integration").join(name);
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("default.toml"), default_toml).unwrap();
    if let Some(user) = user_toml {
        fs::write(dir.join("user.toml"), user).unwrap();
    }
    dir
}

#[test]
#[serial]
fn test_repo_default_config_loads() {
    let config = AppConfig::load().unwrap();
    assert_eq!(config.output.extension, "tscn");
    assert!(!config.output.overwrite);
}

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("GDS_OUTPUT__DIRECTORY", "from_env");
    let config = AppConfig::load().unwrap();
    std::env::remove_var("GDS_OUTPUT__DIRECTORY");
    assert_eq!(config.output.directory, PathBuf::from("from_env"));
}

#[test]
#[serial]
fn test_user_config_overrides_default() {
    let dir = config_dir(
        "user_override",
        "[output]\ndirectory = \"default_out\"\nextension = \"tscn\"\n",
        Some("[output]\ndirectory = \"user_out\"\n\n[debug]\nlog_level = \"debug\"\n"),
    );

    let config = AppConfig::load_from(&dir).unwrap();
    assert_eq!(config.output.directory, PathBuf::from("user_out"));
    assert_eq!(config.output.extension, "tscn");
    assert_eq!(config.debug.log_level, "debug");
}

#[test]
#[serial]
fn test_env_beats_user_config() {
    let dir = config_dir(
        "env_wins",
        "[output]\noverwrite = false\n",
        Some("[output]\noverwrite = false\n"),
    );

    std::env::set_var("GDS_OUTPUT__OVERWRITE", "true");
    let config = AppConfig::load_from(&dir).unwrap();
    std::env::remove_var("GDS_OUTPUT__OVERWRITE");
    assert!(config.output.overwrite);
}

#[test]
#[serial]
fn test_invalid_value_is_an_error() {
    let dir = config_dir("invalid", "[output]\noverwrite = \"sometimes\"\n", None);
    let err = AppConfig::load_from(&dir).unwrap_err();
    assert!(format!("{}", err).starts_with("Configuration error"));
}
