/*!
 * Tests for application configuration
 */

use anyhow::Result;
use log::LevelFilter;
use srtconv::app_config::{Config, LogLevel, DEFAULT_LANGUAGE};
use crate::common;

/// Test loading a complete configuration file
#[test]
fn test_from_file_withFullConfig_shouldLoadValues() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{ "language": "de-DE", "log_level": "trace" }"#,
    )?;

    let config = Config::from_file(&path)?;

    assert_eq!(config.language, "de-DE");
    assert_eq!(config.log_level, LogLevel::Trace);
    assert_eq!(config.log_level.to_level_filter(), LevelFilter::Trace);
    assert!(config.validate().is_ok());
    Ok(())
}

/// Test that an empty object falls back to every default
#[test]
fn test_from_file_withEmptyObject_shouldUseDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{}")?;

    let config = Config::from_file(&path)?;

    assert_eq!(config, Config::default());
    assert_eq!(config.language, DEFAULT_LANGUAGE);
    Ok(())
}

/// Test that a missing file is an error naming the file
#[test]
fn test_from_file_withMissingFile_shouldFail() {
    let error = Config::from_file("no_such_config_12345.json").unwrap_err();

    assert!(error.to_string().contains("no_such_config_12345.json"));
}

/// Test that invalid JSON is rejected
#[test]
fn test_from_file_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", r#"{ "log_level": "loud" }"#)?;

    assert!(Config::from_file(&path).is_err());
    Ok(())
}

/// Test that an unknown but well-formed language only warns
#[test]
fn test_validate_withUnknownLanguage_shouldStillPass() {
    let config = Config {
        language: "qaa-x1".to_string(),
        ..Config::default()
    };

    assert!(config.validate().is_ok());
}

/// Test that a language with markup characters is rejected
#[test]
fn test_validate_withMarkupInLanguage_shouldFail() {
    let config = Config {
        language: "en\"><evil".to_string(),
        ..Config::default()
    };

    assert!(config.validate().is_err());
}
