//! Retry logic utilities for transaction service requests
//!
//! Exponential backoff helpers shared by the HTTP client. Only failures that
//! `ServiceError::is_retryable` accepts are retried.

use crate::config::ServiceConfig;
use crate::errors::{ServiceError, ServiceResult};
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

/// Calculate next backoff duration using exponential backoff with a maximum cap
///
/// `new_backoff = min(current_backoff * multiplier, max_backoff)`
///
/// # Example
/// ```
/// use std::time::Duration;
/// use safe_queue_monitor::service::calculate_next_backoff;
///
/// let backoff = Duration::from_millis(100);
/// let next = calculate_next_backoff(backoff, 2.0, 30);
/// assert_eq!(next, Duration::from_millis(200));
/// ```
pub fn calculate_next_backoff(
    current_backoff: Duration,
    multiplier: f64,
    max_backoff_seconds: u64,
) -> Duration {
    Duration::from_millis((current_backoff.as_millis() as f64 * multiplier) as u64)
        .min(Duration::from_secs(max_backoff_seconds))
}

/// Run `operation` until it succeeds, fails permanently, or attempts run out
///
/// `max_retries` counts total attempts; zero is treated as one.
pub async fn with_retry<T, F, Fut>(
    config: &ServiceConfig,
    endpoint: &str,
    mut operation: F,
) -> ServiceResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ServiceResult<T>>,
{
    let attempts = config.max_retries.max(1);
    let mut backoff = Duration::from_millis(config.initial_backoff_ms);
    let mut attempt = 0;

    loop {
        attempt += 1;
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if !e.is_retryable() => return Err(e),
            Err(e) if attempt >= attempts => {
                if attempts == 1 {
                    return Err(e);
                }
                return Err(ServiceError::MaxRetriesExceeded {
                    endpoint: endpoint.to_string(),
                    last_error: e.to_string(),
                });
            }
            Err(e) => {
                debug!(
                    "Attempt {}/{} for {} failed: {} (retrying in {:?})",
                    attempt, attempts, endpoint, e, backoff
                );
                sleep(backoff).await;
                backoff = calculate_next_backoff(
                    backoff,
                    config.backoff_multiplier,
                    config.max_backoff_seconds,
                );
            }
        }
    }
}
