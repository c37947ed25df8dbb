use crate::config::{Config, SCHEMA_VERSION};
use crate::error::{BotParamsError, Result, ValidationError};
use regex::Regex;
use std::collections::HashSet;

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration, collecting every problem found
    pub fn validate(config: &Config) -> Result<()> {
        let mut errors = Vec::new();

        Self::validate_schema_version(config, &mut errors);
        Self::validate_extraction(config, &mut errors);
        Self::validate_output(config, &mut errors);
        Self::validate_crawlers(config, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(BotParamsError::ConfigValidation { errors })
        }
    }

    fn validate_schema_version(config: &Config, errors: &mut Vec<ValidationError>) {
        let version = &config.meta.schema_version;
        if version != SCHEMA_VERSION {
            errors.push(ValidationError::new(
                "_meta.schema_version",
                format!("Unsupported schema version: {}", version),
            ));
        }
    }

    fn validate_extraction(config: &Config, errors: &mut Vec<ValidationError>) {
        if config.extraction.progress_interval == 0 {
            errors.push(ValidationError::new(
                "extraction.progress_interval",
                "Progress interval must be greater than 0",
            ));
        }
    }

    fn validate_output(config: &Config, errors: &mut Vec<ValidationError>) {
        if config.output.path.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "output.path",
                "Output path cannot be empty",
            ));
        }
    }

    fn validate_crawlers(config: &Config, errors: &mut Vec<ValidationError>) {
        if config.crawlers.is_empty() {
            errors.push(ValidationError::new(
                "crawler",
                "At least one crawler must be configured",
            ));
            return;
        }

        let mut names = HashSet::new();
        for (idx, crawler) in config.crawlers.iter().enumerate() {
            let path = format!("crawler[{}]", idx);

            if crawler.name.trim().is_empty() {
                errors.push(ValidationError::new(
                    format!("{}.name", path),
                    "Crawler name cannot be empty",
                ));
            } else if !names.insert(crawler.name.as_str()) {
                errors.push(ValidationError::new(
                    format!("{}.name", path),
                    format!("Duplicate crawler name: {}", crawler.name),
                ));
            }

            if crawler.pattern.is_empty() {
                errors.push(ValidationError::new(
                    format!("{}.pattern", path),
                    "Crawler pattern cannot be empty",
                ));
            } else if let Err(e) = Regex::new(&crawler.pattern) {
                errors.push(ValidationError::new(
                    format!("{}.pattern", path),
                    format!("Invalid regex: {}", e),
                ));
            }
        }
    }
}
