//! Telemetry subsystem (visit tracking).
//!
//! Runs concurrently with route resolution and is joined before the response
//! is finalized. Its result is discarded: a slow or failing analytics sink
//! never changes what the client receives.

pub mod visit;

pub use visit::{TelemetryError, TrackOutcome, Visit, VisitTracker};
