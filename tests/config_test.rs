//! Configuration tests
//!
//! Test cases for configuration file and environment variable support:
//! 1. Load config from TOML file
//! 2. Environment variable override
//! 3. Default values
//! 4. Priority: CLI > ENV > Config > Default

use std::path::PathBuf;
use sukhan::config::app_config::AppConfig;
use sukhan::Lang;
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = AppConfig::default();
    assert_eq!(config.index_dir(), ".sukhan");
    assert_eq!(config.site_url(), "http://localhost:3000");
}

#[test]
fn test_load_from_toml() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    std::fs::write(
        &config_path,
        r#"
index_dir = "/custom/index"
default_lang = "en"
default_top_k = 20
site_url = "https://sukhan.example.org/"
"#,
    )
    .unwrap();

    let config = AppConfig::from_file(&config_path).unwrap();
    assert_eq!(config.index_dir(), "/custom/index");
    assert_eq!(config.default_lang(), Lang::En);
    assert_eq!(config.default_top_k(), 20);
    assert_eq!(config.site_url(), "https://sukhan.example.org");
    assert!(config.validate().is_ok());
}

// Environment cases share one test so parallel tests never see each other's vars
#[test]
fn test_env_override_and_merge_priority() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        r#"
index_dir = "/file/index"
default_top_k = 15
"#,
    )
    .unwrap();

    std::env::set_var("SUKHAN_INDEX_DIR", "/env/index");
    std::env::set_var("SUKHAN_TOP_K", "not-a-number");

    let env_config = AppConfig::from_env();
    assert_eq!(env_config.index_dir(), "/env/index");
    assert_eq!(env_config.default_top_k(), 10);

    let file_config = AppConfig::from_file(&config_path).unwrap();
    let merged = file_config.merge_with(&env_config);

    // ENV should override file
    assert_eq!(merged.index_dir(), "/env/index");
    // File value should be preserved where ENV is not set
    assert_eq!(merged.default_top_k(), 15);

    std::env::remove_var("SUKHAN_INDEX_DIR");
    std::env::remove_var("SUKHAN_TOP_K");
}

#[test]
fn test_config_with_cli_override() {
    let config = AppConfig::default()
        .with_index_dir("/cli/index")
        .with_users_db("/cli/users.db");

    assert_eq!(config.index_dir(), "/cli/index");
    assert_eq!(config.users_db(), "/cli/users.db");
}

#[test]
fn test_invalid_file_values_fail_validation() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, "default_lang = \"ur\"\n").unwrap();

    let config = AppConfig::from_file(&config_path).unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_serialization_round_trip() {
    let config = AppConfig::default()
        .with_index_dir("/test/index")
        .with_default_top_k(25);

    let toml_str = config.to_toml().unwrap();
    assert!(toml_str.contains("/test/index"));

    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, toml_str).unwrap();
    let reloaded = AppConfig::from_file(&path).unwrap();
    assert_eq!(reloaded.default_top_k(), 25);
}

#[test]
fn test_missing_file_returns_error() {
    let result = AppConfig::from_file(&PathBuf::from("/nonexistent/config.toml"));
    assert!(result.is_err());
}
