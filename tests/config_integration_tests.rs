//! Integration tests for ConfigManager and settings file handling
//!
//! These tests verify:
//! - Defaults when no settings file exists
//! - Loading values from `csgo-patcher.yaml`
//! - Environment variables overriding the file
//! - Malformed settings surfacing as errors

use camino::Utf8PathBuf;
use csgo_patcher::config::{ENV_PREFIX, SETTINGS_FILE_NAME};
use csgo_patcher::{ConfigManager, PatcherSettings};
use std::fs;
use tempfile::TempDir;

fn create_test_config_dir() -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    (temp_dir, config_path)
}

fn env(pairs: &[(&str, &str)]) -> config::Map<String, String> {
    pairs
        .iter()
        .map(|(key, value)| (format!("{ENV_PREFIX}_{key}"), value.to_string()))
        .collect()
}

#[test]
fn test_create_config_manager() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path);

    assert_eq!(manager.config_dir(), &config_path);
    assert_eq!(manager.settings_path(), config_path.join(SETTINGS_FILE_NAME));
}

#[test]
fn test_load_default_settings() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path);

    // Settings file doesn't exist, should return defaults
    let settings = manager.load_settings_with_env(env(&[])).unwrap();

    assert_eq!(settings, PatcherSettings::default());
}

#[test]
fn test_load_settings_file() {
    let (_temp_dir, config_path) = create_test_config_dir();
    fs::write(
        config_path.join(SETTINGS_FILE_NAME),
        "verbose: false\npause_on_exit: false\nsteam_path: /opt/steam\nlog_dir: logs\ndebug: true\n",
    )
    .unwrap();

    let settings = ConfigManager::new(&config_path)
        .load_settings_with_env(env(&[]))
        .unwrap();

    assert!(!settings.verbose);
    assert!(!settings.pause_on_exit);
    assert_eq!(settings.steam_path.as_deref(), Some("/opt/steam"));
    assert_eq!(settings.log_dir.as_deref(), Some("logs"));
    assert!(settings.debug);
}

#[test]
fn test_environment_overrides_file() {
    let (_temp_dir, config_path) = create_test_config_dir();
    fs::write(
        config_path.join(SETTINGS_FILE_NAME),
        "verbose: true\nsteam_path: /from/file\n",
    )
    .unwrap();

    let settings = ConfigManager::new(&config_path)
        .load_settings_with_env(env(&[
            ("VERBOSE", "false"),
            ("STEAM_PATH", "/from/env"),
            ("PAUSE_ON_EXIT", "false"),
        ]))
        .unwrap();

    assert!(!settings.verbose);
    assert!(!settings.pause_on_exit);
    assert_eq!(settings.steam_path.as_deref(), Some("/from/env"));
}

#[test]
fn test_unrelated_environment_is_ignored() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let mut vars = env(&[]);
    vars.insert("HOME".to_string(), "/home/someone".to_string());
    vars.insert("VERBOSE".to_string(), "false".to_string());

    let settings = ConfigManager::new(&config_path)
        .load_settings_with_env(vars)
        .unwrap();

    assert_eq!(settings, PatcherSettings::default());
}

#[test]
fn test_malformed_settings_file() {
    let (_temp_dir, config_path) = create_test_config_dir();
    fs::write(config_path.join(SETTINGS_FILE_NAME), "verbose: [not, a, bool\n").unwrap();

    let result = ConfigManager::new(&config_path).load_settings_with_env(env(&[]));

    assert!(result.is_err());
}

#[test]
fn test_wrong_type_in_settings_file() {
    let (_temp_dir, config_path) = create_test_config_dir();
    fs::write(config_path.join(SETTINGS_FILE_NAME), "pause_on_exit: sometimes\n").unwrap();

    let result = ConfigManager::new(&config_path).load_settings_with_env(env(&[]));

    assert!(result.is_err());
}
