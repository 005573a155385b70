//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap outbound side effects (tracking, error reports) with a deadline
//! - Cancel the wrapped operation cleanly when the deadline passes
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities; the inner future is dropped on expiry
//! - Timeout errors are distinct from the operation's own errors

use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// The deadline passed before the operation finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("deadline of {}ms exceeded", .0.as_millis())]
pub struct DeadlineExceeded(pub Duration);

/// Run `operation`, giving up after `deadline`.
pub async fn with_deadline<F, T>(deadline: Duration, operation: F) -> Result<T, DeadlineExceeded>
where
    F: Future<Output = T>,
{
    tokio::time::timeout(deadline, operation)
        .await
        .map_err(|_| DeadlineExceeded(deadline))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completes_within_deadline() {
        let result = with_deadline(Duration::from_millis(200), async { 7 }).await;
        assert_eq!(result, Ok(7));
    }

    #[tokio::test]
    async fn test_aborts_after_deadline() {
        let result = with_deadline(
            Duration::from_millis(50),
            tokio::time::sleep(Duration::from_secs(10)),
        )
        .await;
        let err = result.unwrap_err();
        assert_eq!(err, DeadlineExceeded(Duration::from_millis(50)));
        assert_eq!(err.to_string(), "deadline of 50ms exceeded");
    }
}
