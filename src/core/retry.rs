use crate::core::api_error::SmartsheetError;
use std::time::Duration;

pub const DEFAULT_MAX_RETRY_TIME: Duration = Duration::from_secs(30);
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);

/// Exponential backoff budget for retryable failures.
///
/// Pure decision logic: it never sleeps or re-issues a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retry_time: Duration,
    base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETRY_TIME, DEFAULT_BASE_DELAY)
    }
}

impl RetryPolicy {
    pub fn new(max_retry_time: Duration, base_delay: Duration) -> Self {
        Self {
            max_retry_time,
            base_delay,
        }
    }

    pub fn max_retry_time(&self) -> Duration {
        self.max_retry_time
    }

    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// `base_delay * 2^attempt`, saturating.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2_u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }

    /// Delay before the next attempt, or `None` when the error is not
    /// retryable or waiting would overrun the retry budget.
    pub fn next_delay(
        &self,
        error: &SmartsheetError,
        attempt: u32,
        elapsed: Duration,
    ) -> Option<Duration> {
        if !error.should_retry() {
            return None;
        }
        let delay = self.backoff(attempt);
        if elapsed.saturating_add(delay) > self.max_retry_time {
            tracing::debug!(
                "retry budget exhausted after {:?} (attempt {})",
                elapsed,
                attempt
            );
            return None;
        }
        tracing::debug!("retrying in {:?} (attempt {}): {}", delay, attempt, error);
        Some(delay)
    }
}
