//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Side effect next to route resolution (visit tracking, error report):
//!     → timeouts.rs (enforce deadline, drop on expiry)
//!     → caller logs and discards the failure
//! ```
//!
//! # Design Decisions
//! - Every auxiliary external call has a deadline
//! - No retries: a failed content backend query fails the current request

pub mod timeouts;

pub use timeouts::{with_deadline, DeadlineExceeded};
