//! Error-reporting sink.
//!
//! # Responsibilities
//! - Capture request context and the error's source chain
//! - Deliver the report before the failure page is returned
//!
//! # Design Decisions
//! - Disabled unless an endpoint is configured
//! - Delivery has a deadline; a lost report is logged, never escalated

use axum::http::{HeaderMap, Method, Uri};
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;

use crate::config::{Environment, ErrorReportingConfig};
use crate::resilience::{with_deadline, DeadlineExceeded};

/// Request headers copied into reports.
const REPORTED_HEADERS: &[&str] = &[
    "user-agent",
    "referer",
    "cf-connecting-ip",
    "cf-ray",
    "x-forwarded-for",
];

/// One failed request, as sent to the error tracker.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FailureReport {
    pub request_id: String,
    pub method: String,
    pub uri: String,
    pub headers: BTreeMap<String, String>,
    pub message: String,
    /// `source()` chain below the top-level error, outermost first.
    pub causes: Vec<String>,
    pub environment: &'static str,
    pub release: &'static str,
    pub timestamp: u64,
}

/// Request context captured before the handler consumes the request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: String,
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
}

impl FailureReport {
    pub fn new(
        context: &RequestContext,
        error: &(dyn std::error::Error + 'static),
        environment: Environment,
    ) -> Self {
        let headers = REPORTED_HEADERS
            .iter()
            .filter_map(|name| {
                let value = context.headers.get(*name)?.to_str().ok()?;
                Some((name.to_string(), value.to_string()))
            })
            .collect();

        let mut causes = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }

        Self {
            request_id: context.request_id.clone(),
            method: context.method.to_string(),
            uri: context.uri.to_string(),
            headers,
            message: error.to_string(),
            causes,
            environment: environment.as_str(),
            release: env!("CARGO_PKG_VERSION"),
            timestamp: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("report delivery failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("error tracker answered {0}")]
    Status(u16),

    #[error(transparent)]
    Timeout(#[from] DeadlineExceeded),
}

/// Sends failure reports to the configured tracker.
#[derive(Clone)]
pub struct ErrorReporter {
    http: reqwest::Client,
    config: ErrorReportingConfig,
}

impl ErrorReporter {
    pub fn new(http: reqwest::Client, config: ErrorReportingConfig) -> Self {
        Self { http, config }
    }

    /// Deliver `report`; failures are logged and swallowed.
    pub async fn report(&self, report: &FailureReport) {
        let Some(endpoint) = self.config.endpoint.as_deref() else {
            return;
        };

        let deadline = Duration::from_millis(self.config.timeout_ms);
        let result = match with_deadline(deadline, self.send(endpoint, report)).await {
            Ok(inner) => inner,
            Err(elapsed) => Err(elapsed.into()),
        };

        match result {
            Ok(()) => tracing::debug!(request_id = %report.request_id, "Failure reported"),
            Err(e) => tracing::warn!(
                request_id = %report.request_id,
                error = %e,
                "Failed to deliver failure report"
            ),
        }
    }

    async fn send(&self, endpoint: &str, report: &FailureReport) -> Result<(), ReportError> {
        let response = self.http.post(endpoint).json(report).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ReportError::Status(status.as_u16()));
        }
        Ok(())
    }
}

impl std::fmt::Debug for ErrorReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorReporter")
            .field("endpoint", &self.config.endpoint)
            .finish()
    }
}
