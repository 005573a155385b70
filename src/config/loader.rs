//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use crate::config::schema::EdgeConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Analytics API key.
pub const ENV_AMPLITUDE_API_KEY: &str = "AMPLITUDE_API_KEY";
/// Error-reporting endpoint.
pub const ENV_ERROR_REPORTING_ENDPOINT: &str = "ERROR_REPORTING_ENDPOINT";
/// Deployment environment name.
pub const ENV_ENVIRONMENT: &str = "GRTN_ENVIRONMENT";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Environment(String),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Environment(e) => write!(f, "Environment error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load configuration from an optional TOML file, apply environment
/// overrides, and validate the result.
pub fn load_config(path: Option<&Path>) -> Result<EdgeConfig, ConfigError> {
    let mut config = match path {
        Some(path) => parse_config(&fs::read_to_string(path).map_err(ConfigError::Io)?)?,
        None => EdgeConfig::default(),
    };

    apply_overrides(&mut config, |key| std::env::var(key).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Parse a TOML document into a configuration without validating it.
pub fn parse_config(content: &str) -> Result<EdgeConfig, ConfigError> {
    toml::from_str(content).map_err(ConfigError::Parse)
}

/// Apply environment overrides through `lookup`; empty values are ignored.
pub fn apply_overrides<F>(config: &mut EdgeConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(key) = lookup(ENV_AMPLITUDE_API_KEY) {
        config.telemetry.api_key = Some(key);
    }
    if let Some(endpoint) = lookup(ENV_ERROR_REPORTING_ENDPOINT) {
        config.error_reporting.endpoint = Some(endpoint);
    }
    if let Some(environment) = lookup(ENV_ENVIRONMENT) {
        config.environment = environment.parse().map_err(ConfigError::Environment)?;
    }

    Ok(())
}
