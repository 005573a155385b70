//! Visit tracking.
//!
//! # Responsibilities
//! - Build the analytics event envelope for one visit
//! - POST it with a deadline
//! - Never let its outcome reach the response
//!
//! # Design Decisions
//! - Skipped entirely without an API key
//! - `insert_id` lets the sink drop duplicates if a request is replayed

use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::config::TelemetryConfig;
use crate::observability::metrics;
use crate::resilience::{with_deadline, DeadlineExceeded};

/// One visited path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    pub path: String,
    pub client_ip: Option<String>,
}

#[derive(Debug, Serialize)]
struct EventEnvelope<'a> {
    api_key: &'a str,
    events: [Event<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Event<'a> {
    user_id: &'a str,
    event_type: &'static str,
    event_properties: EventProperties<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ip: Option<&'a str>,
    insert_id: String,
}

#[derive(Debug, Serialize)]
struct EventProperties<'a> {
    pathname: &'a str,
}

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("tracking request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("analytics sink answered {0}")]
    Status(u16),

    #[error(transparent)]
    Timeout(#[from] DeadlineExceeded),
}

/// How a tracking attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackOutcome {
    Sent,
    Skipped,
    Failed,
    TimedOut,
}

impl TrackOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackOutcome::Sent => "sent",
            TrackOutcome::Skipped => "skipped",
            TrackOutcome::Failed => "failed",
            TrackOutcome::TimedOut => "timeout",
        }
    }
}

/// Sends visit events to the analytics sink.
#[derive(Clone)]
pub struct VisitTracker {
    http: reqwest::Client,
    config: TelemetryConfig,
}

impl VisitTracker {
    pub fn new(http: reqwest::Client, config: TelemetryConfig) -> Self {
        Self { http, config }
    }

    /// Header the client IP is read from.
    pub fn client_ip_header(&self) -> &str {
        &self.config.client_ip_header
    }

    /// Track `visit`. Errors and timeouts are logged and folded into the outcome.
    pub async fn track(&self, visit: &Visit) -> TrackOutcome {
        let Some(api_key) = self.config.api_key.as_deref() else {
            metrics::record_visit_tracking(TrackOutcome::Skipped.as_str());
            return TrackOutcome::Skipped;
        };

        let deadline = Duration::from_millis(self.config.timeout_ms);
        let result = match with_deadline(deadline, self.send(api_key, visit)).await {
            Ok(inner) => inner,
            Err(elapsed) => Err(elapsed.into()),
        };

        let outcome = match result {
            Ok(()) => TrackOutcome::Sent,
            Err(TelemetryError::Timeout(e)) => {
                tracing::warn!(path = %visit.path, error = %e, "Visit tracking timed out");
                TrackOutcome::TimedOut
            }
            Err(e) => {
                tracing::warn!(path = %visit.path, error = %e, "Failed to track visit");
                TrackOutcome::Failed
            }
        };
        metrics::record_visit_tracking(outcome.as_str());
        outcome
    }

    async fn send(&self, api_key: &str, visit: &Visit) -> Result<(), TelemetryError> {
        let envelope = self.envelope(api_key, visit);
        let response = self
            .http
            .post(&self.config.endpoint)
            .json(&envelope)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TelemetryError::Status(status.as_u16()));
        }
        Ok(())
    }

    fn envelope<'a>(&'a self, api_key: &'a str, visit: &'a Visit) -> EventEnvelope<'a> {
        EventEnvelope {
            api_key,
            events: [Event {
                user_id: &self.config.user_id,
                event_type: "visit",
                event_properties: EventProperties {
                    pathname: &visit.path,
                },
                ip: visit.client_ip.as_deref(),
                insert_id: Uuid::new_v4().to_string(),
            }],
        }
    }
}

impl std::fmt::Debug for VisitTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisitTracker")
            .field("endpoint", &self.config.endpoint)
            .field("enabled", &self.config.api_key.is_some())
            .finish()
    }
}
