//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the redirect
//! service. All types derive Serde traits for deserialization from config files,
//! and every section has defaults so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

/// Root configuration for the redirect service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct EdgeConfig {
    /// Deployment environment (controls how failures surface).
    pub environment: Environment,

    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Content backend the route table is pulled from.
    pub wiki: WikiConfig,

    /// Fixed destinations outside the route table.
    pub redirects: RedirectConfig,

    /// Visit tracking sink.
    pub telemetry: TelemetryConfig,

    /// Error-reporting sink.
    pub error_reporting: ErrorReportingConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Failures render the generic failure page.
    #[default]
    Production,
    /// Failures surface raw for debugging.
    Development,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Production => "production",
            Environment::Development => "development",
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Environment::Production),
            "development" | "dev" | "local" => Ok(Environment::Development),
            other => Err(format!("unknown environment '{}'", other)),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Content backend (wiki) configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WikiConfig {
    /// Search endpoint taking a JSON-encoded `input` query parameter.
    pub search_url: String,

    /// Public site the canonical page URLs point at.
    pub site_url: String,

    /// Page reference prefix of the event namespace.
    pub event_prefix: String,

    /// Max-age hint sent to intermediate caches, in seconds.
    pub cache_ttl_secs: u64,

    /// Per-query timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            search_url: "https://wiki.creatorsgarten.org/api/contentsgarten/search".to_string(),
            site_url: "https://creatorsgarten.org".to_string(),
            event_prefix: "Events/".to_string(),
            cache_ttl_secs: 15,
            timeout_secs: 10,
        }
    }
}

/// Destinations that do not come from the route table.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RedirectConfig {
    /// Where `/` redirects to.
    pub landing_url: String,

    /// Short-link service unmatched paths are forwarded onto.
    /// Must end with `/`; the unmatched path is appended verbatim.
    pub fallback_base_url: String,
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self {
            landing_url: "https://creatorsgarten.org/wiki/GRTN".to_string(),
            fallback_base_url: "https://go.creatorsgarten.org/".to_string(),
        }
    }
}

/// Visit tracking configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Analytics HTTP API endpoint.
    pub endpoint: String,

    /// API key; tracking is skipped when absent.
    pub api_key: Option<String>,

    /// Pseudonymous user id attached to every event.
    pub user_id: String,

    /// Header carrying the original client IP (set by the CDN).
    pub client_ip_header: String,

    /// Deadline for the tracking call in milliseconds.
    pub timeout_ms: u64,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api2.amplitude.com/2/httpapi".to_string(),
            api_key: None,
            user_id: "anonymous_user".to_string(),
            client_ip_header: "cf-connecting-ip".to_string(),
            timeout_ms: 1000,
        }
    }
}

/// Error-reporting sink configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ErrorReportingConfig {
    /// Endpoint failure reports are POSTed to; reporting is off when absent.
    pub endpoint: Option<String>,

    /// Delivery timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for ErrorReportingConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_ms: 2000,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter directive used when `RUST_LOG` is unset.
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "grtn_redirect=info,tower_http=info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
