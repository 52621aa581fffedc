//! Bounded retry policy for transient GraphQL failures.

use std::time::Duration;

use reqwest::StatusCode;

/// Default number of attempts per request, including the first.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 2;

/// Default pause between attempts.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// How many times a request may be sent and how long to wait between sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY)
    }
}

impl RetryPolicy {
    /// Creates a policy. `max_attempts` is clamped to at least one.
    #[must_use]
    pub const fn new(max_attempts: u32, delay: Duration) -> Self {
        let attempts = if max_attempts == 0 { 1 } else { max_attempts };
        Self {
            max_attempts: attempts,
            delay,
        }
    }

    /// Total attempts allowed, including the first.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Pause before the next attempt.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Whether another attempt may follow attempt number `attempt` (1-based).
    #[must_use]
    pub const fn allows_another(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}

/// Rate-limit and upstream gateway statuses worth a second try.
pub(crate) const fn is_transient_status(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::FORBIDDEN
            | StatusCode::TOO_MANY_REQUESTS
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    )
}
