//! Metrics collection and exposition.
//!
//! # Metrics
//! - `grtn_requests_total` (counter): requests by outcome, status
//! - `grtn_request_duration_seconds` (histogram): latency by outcome
//! - `grtn_backend_queries_total` (counter): wiki searches by query, result
//! - `grtn_visit_tracking_total` (counter): tracking calls by result
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed
//! - The Prometheus endpoint is opt-in

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a finished request.
pub fn record_request(outcome: &'static str, status: u16, start: Instant) {
    counter!("grtn_requests_total", "outcome" => outcome, "status" => status.to_string())
        .increment(1);
    histogram!("grtn_request_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

/// Record one content backend search.
pub fn record_backend_query(query: &'static str, success: bool) {
    let result = if success { "ok" } else { "error" };
    counter!("grtn_backend_queries_total", "query" => query, "result" => result).increment(1);
}

/// Record the result of a visit tracking call.
pub fn record_visit_tracking(result: &'static str) {
    counter!("grtn_visit_tracking_total", "result" => result).increment(1);
}
