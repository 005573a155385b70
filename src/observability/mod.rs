//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Request failures:
//!     → errors.rs (report to the external error tracker)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Request ID flows through logs and failure reports
//! - Metrics are cheap and off by default

pub mod errors;
pub mod logging;
pub mod metrics;

pub use errors::{ErrorReporter, FailureReport, RequestContext};
