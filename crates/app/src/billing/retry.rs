//! Exponential backoff for billing calls.

use std::time::Duration;

use crate::billing::errors::AttemptFailure;

/// Retry policy for one logical create-provider call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the initial attempt.
    pub max_retries: u32,

    /// Delay after the first failed attempt; doubled after each further failure.
    pub base_delay: Duration,

    /// Upper bound applied to collaborator-supplied `Retry-After` values.
    pub max_retry_after: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(500),
            max_retry_after: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Total attempts allowed, including the first.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Computed backoff after the given 1-based failed attempt.
    #[must_use]
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1);

        self.base_delay
            .saturating_mul(2u32.saturating_pow(exponent))
    }

    /// How long to wait before the next attempt, or `None` to stop.
    ///
    /// `attempt` is the 1-based number of the attempt that just failed. A `Retry-After`
    /// carried by `failure` replaces the computed backoff for this wait only.
    #[must_use]
    pub fn next_delay(&self, attempt: u32, failure: &AttemptFailure) -> Option<Duration> {
        if !failure.is_retryable() || attempt >= self.max_attempts() {
            return None;
        }

        // Collaborator hints are honoured up to `max_retry_after` and no further.
        Some(
            failure
                .retry_after()
                .map_or_else(|| self.backoff(attempt), |hint| hint.min(self.max_retry_after)),
        )
    }
}
