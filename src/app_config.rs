use anyhow::{Context, Result, anyhow};
use log::{LevelFilter, warn};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::language_utils;

/// Language tag written into documents when nothing else is configured
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Application configuration module
/// This module handles loading and validating converter settings. Every
/// field has a default, so a configuration file only needs the values it
/// wants to change.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Caption language tag (BCP-47 style, e.g. "en-US")
    #[serde(default = "default_language")]
    pub language: String,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

impl Config {
    /// Load a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the configuration
    ///
    /// A malformed language tag is an error. A well-formed tag whose
    /// language is not in ISO 639 is only reported, since players accept
    /// private-use tags.
    pub fn validate(&self) -> Result<()> {
        language_utils::validate_language_tag(&self.language)
            .map_err(|e| anyhow!("Invalid caption language: {}", e))?;

        if !language_utils::is_known_language(&self.language) {
            warn!("Language tag '{}' is not a known ISO 639 language", self.language);
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            language: default_language(),
            log_level: LogLevel::default(),
        }
    }
}
