//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate URLs and socket addresses
//! - Validate value ranges (timeouts > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: EdgeConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::EdgeConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: '{value}' is not an absolute http(s) URL")]
    InvalidUrl { field: &'static str, value: String },

    #[error("{field}: '{value}' is not a socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field} must be greater than zero")]
    ZeroTimeout { field: &'static str },

    #[error("redirects.fallback_base_url must end with '/'")]
    FallbackWithoutSlash,
}

/// Validate a parsed configuration.
pub fn validate_config(config: &EdgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(&mut errors, "listener.bind_address", &config.listener.bind_address);
    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    check_url(&mut errors, "wiki.search_url", &config.wiki.search_url);
    check_url(&mut errors, "wiki.site_url", &config.wiki.site_url);
    check_url(&mut errors, "redirects.landing_url", &config.redirects.landing_url);
    check_url(
        &mut errors,
        "redirects.fallback_base_url",
        &config.redirects.fallback_base_url,
    );
    if !config.redirects.fallback_base_url.ends_with('/') {
        errors.push(ValidationError::FallbackWithoutSlash);
    }
    check_url(&mut errors, "telemetry.endpoint", &config.telemetry.endpoint);
    if let Some(endpoint) = &config.error_reporting.endpoint {
        check_url(&mut errors, "error_reporting.endpoint", endpoint);
    }

    let timeouts = [
        ("wiki.timeout_secs", config.wiki.timeout_secs),
        ("telemetry.timeout_ms", config.telemetry.timeout_ms),
        ("error_reporting.timeout_ms", config.error_reporting.timeout_ms),
        ("timeouts.request_secs", config.timeouts.request_secs),
    ];
    for (field, value) in timeouts {
        if value == 0 {
            errors.push(ValidationError::ZeroTimeout { field });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    let valid = Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false);
    if !valid {
        errors.push(ValidationError::InvalidUrl {
            field,
            value: value.to_string(),
        });
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}
