//! Status-code-triggered retry policy
//!
//! The retry loop is serial: wait, then reissue the request. Only responses
//! whose status is in the retryable set are retried; transport-level errors
//! (no response at all) are fatal on the first occurrence.

use rand::Rng;
use std::time::Duration;

/// Retry policy applied to every request issued by a [`VaultClient`].
///
/// An explicit per-client value, not shared global state: two clients with
/// different policies cannot clobber one another's settings.
///
/// [`VaultClient`]: crate::client::VaultClient
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first
    pub max_attempts: u32,

    /// Delay before the first retry
    pub initial_delay: Duration,

    /// Cap applied to the exponentially growing delay
    pub max_delay: Duration,

    /// Response statuses that trigger a retry
    pub retryable_statuses: Vec<u16>,

    /// Add up to 25% random jitter to each delay
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::from_secs(3),
            max_delay: Duration::from_secs(30),
            retryable_statuses: vec![400, 500, 502, 503, 504],
            jitter: false,
        }
    }
}

impl RetryPolicy {
    /// Check whether a response status should trigger a retry
    pub fn is_retryable_status(&self, status: u16) -> bool {
        self.retryable_statuses.contains(&status)
    }

    /// Calculate the delay before the next attempt
    ///
    /// `attempt` is 1-indexed: the delay after the first failed attempt is
    /// `initial_delay`, doubling each attempt and capped at `max_delay`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let attempt_index = attempt.saturating_sub(1);
        let multiplier = 2u64.saturating_pow(attempt_index);
        let base = self
            .initial_delay
            .saturating_mul(multiplier.min(u32::MAX as u64) as u32)
            .min(self.max_delay);

        if self.jitter && !base.is_zero() {
            let jitter_range = base / 4;
            let jitter_ms = rand::rng().random_range(0..=jitter_range.as_millis() as u64);
            base + Duration::from_millis(jitter_ms)
        } else {
            base
        }
    }
}
