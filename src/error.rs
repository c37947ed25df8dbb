use std::path::PathBuf;
use thiserror::Error;

/// Main error type for botparams
#[derive(Error, Debug)]
pub enum BotParamsError {
    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration validation errors
    #[error("Configuration validation failed: {errors:?}")]
    ConfigValidation { errors: Vec<ValidationError> },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Invalid configuration value
    #[error("Invalid configuration value at {path}: {message}")]
    InvalidConfigValue { path: String, message: String },

    /// Crawler pattern that does not compile
    #[error("Invalid regex for crawler '{name}': {source}")]
    InvalidPattern {
        name: String,
        source: regex::Error,
    },

    /// Crawler choice outside the catalog
    #[error("Invalid crawler selection: {input:?}")]
    InvalidSelection { input: String },

    /// IO errors
    #[error("IO error: {context}: {source}")]
    Io {
        source: std::io::Error,
        context: String,
    },

    /// CSV output errors
    #[error("CSV error: {context}: {source}")]
    Csv { source: csv::Error, context: String },

    /// TOML deserialization errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Path to the configuration key that failed validation
    pub path: String,
    /// Error message describing the validation failure
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type for botparams operations
pub type Result<T> = std::result::Result<T, BotParamsError>;
