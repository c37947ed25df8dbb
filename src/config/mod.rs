//! Configuration management for botparams
//!
//! Settings come from an optional TOML file, then environment overrides.
//! Every field has a default, so running without any file behaves like the
//! built-in catalog with `parameters.csv` output.

use crate::error::{BotParamsError, Result};
use crate::extractor::DEFAULT_PROGRESS_INTERVAL;
use crate::patterns::{default_crawlers, CrawlerCatalog, CrawlerConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod validator;

pub use validator::ConfigValidator;

/// Supported configuration schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "_meta", default)]
    pub meta: MetaConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub output: OutputConfig,
    /// Crawler catalog in menu order
    #[serde(rename = "crawler", default = "default_crawlers")]
    pub crawlers: Vec<CrawlerConfig>,
}

/// Metadata about the configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaConfig {
    pub schema_version: String,
}

impl Default for MetaConfig {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
        }
    }
}

/// Log scanning settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Lines between progress reports
    pub progress_interval: u64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

/// Report output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// CSV file written at the end of a run
    pub path: PathBuf,
    /// Rows printed to the console
    pub console_rows: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("parameters.csv"),
            console_rows: 10,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(BotParamsError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| BotParamsError::Io {
            source: e,
            context: format!("Failed to read config file: {:?}", path),
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse, apply environment overrides and validate
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)?;

        config.apply_env_overrides();

        ConfigValidator::validate(&config)?;

        Ok(config)
    }

    /// Resolve the configuration for a run
    ///
    /// An explicit path must exist. Without one the default location is used
    /// when present, otherwise built-in defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match Self::default_path() {
            Ok(path) if path.exists() => Self::load(&path),
            Ok(_) => {
                tracing::debug!("No config file found, using defaults");
                Self::with_env_defaults()
            }
            Err(e) => {
                tracing::warn!("{}, using defaults", e);
                Self::with_env_defaults()
            }
        }
    }

    fn with_env_defaults() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env_overrides();
        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    /// Compile the configured crawler catalog
    pub fn catalog(&self) -> Result<CrawlerCatalog> {
        CrawlerCatalog::from_configs(&self.crawlers)
    }

    /// Apply environment variable overrides
    /// Environment variables in format: BOTPARAMS_SECTION__KEY=value
    pub fn apply_env_overrides(&mut self) {
        for (key, value) in std::env::vars() {
            if let Some(config_key) = key.strip_prefix("BOTPARAMS_") {
                if let Err(e) = self.set_value_from_env(config_key, &value) {
                    tracing::warn!("Failed to apply env override {}: {}", key, e);
                }
            }
        }
    }

    fn set_value_from_env(&mut self, path: &str, value: &str) -> Result<()> {
        match path {
            "EXTRACTION__PROGRESS_INTERVAL" => {
                self.extraction.progress_interval =
                    value.parse().map_err(|_| BotParamsError::InvalidConfigValue {
                        path: path.to_string(),
                        message: format!("Cannot parse '{}' as a line count", value),
                    })?;
            }
            "OUTPUT__PATH" => {
                self.output.path = PathBuf::from(value);
            }
            "OUTPUT__CONSOLE_ROWS" => {
                self.output.console_rows =
                    value.parse().map_err(|_| BotParamsError::InvalidConfigValue {
                        path: path.to_string(),
                        message: format!("Cannot parse '{}' as a row count", value),
                    })?;
            }
            _ => {
                tracing::debug!("Unknown env config key: {}", path);
            }
        }
        Ok(())
    }

    /// Get the default configuration file path
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            BotParamsError::Config("Cannot determine config directory".to_string())
        })?;

        Ok(config_dir.join("botparams").join("config.toml"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            meta: MetaConfig::default(),
            extraction: ExtractionConfig::default(),
            output: OutputConfig::default(),
            crawlers: default_crawlers(),
        }
    }
}
