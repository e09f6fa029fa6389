//! Bounded exponential backoff for outbound feed requests.
//!
//! Only failures for which [`FeedError::is_retryable`] holds are retried;
//! anything else is returned to the caller immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::FeedError;

/// Tunable parameters for the backoff strategy.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the first attempt. `0` disables retrying.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Upper bound on the delay between attempts.
    pub max_delay: Duration,
    /// Factor by which the delay grows after each failure.
    pub multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(8),
            multiplier: 2.0,
        }
    }
}

/// Calculate the next backoff delay, clamped to [`RetryConfig::max_delay`].
pub fn next_delay(current: Duration, config: &RetryConfig) -> Duration {
    let next_ms = (current.as_millis() as f64 * config.multiplier) as u64;
    Duration::from_millis(next_ms).min(config.max_delay)
}

/// Run `operation` until it succeeds, fails with a non-retryable error, or
/// the retry budget is spent. The last error is returned.
pub async fn with_retry<T, F, Fut>(
    label: &str,
    config: &RetryConfig,
    mut operation: F,
) -> Result<T, FeedError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FeedError>>,
{
    let mut delay = config.initial_delay;
    let mut attempt = 0u32;

    loop {
        attempt += 1;
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() && attempt <= config.max_retries => {
                tracing::warn!(
                    request = label,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Feed request failed, retrying",
                );
                tokio::time::sleep(delay).await;
                delay = next_delay(delay, config);
            }
            Err(e) => {
                tracing::error!(request = label, attempt, error = %e, "Feed request failed");
                return Err(e);
            }
        }
    }
}
