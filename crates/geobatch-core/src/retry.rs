//! Bounded retry for provider quota rejections.

use serde_json::Value;

use crate::classify::GeocodeOutcome;
use crate::error::GeocodeError;

/// Decision for a classified outcome at a given attempt.
#[derive(Debug)]
pub enum RetryDecision {
    /// Re-issue the rate-limited call.
    Retry,
    /// Terminal; surface the result to the caller.
    Resolve(Result<Vec<Value>, GeocodeError>),
}

/// Quota-retry policy.
///
/// Only `OverQuotaFailure` is retryable; every other outcome resolves
/// immediately. A fully exhausted sequence performs exactly
/// `max_retries + 1` provider calls. No backoff is applied between retries
/// beyond what the throttle naturally imposes, and retries are not
/// jittered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
}

impl RetryPolicy {
    pub const fn new(max_retries: u32) -> Self {
        Self { max_retries }
    }

    pub const fn max_retries(self) -> u32 {
        self.max_retries
    }

    pub const fn total_attempts(self) -> u32 {
        self.max_retries + 1
    }

    /// `attempt` counts made attempts, starting at 1.
    pub fn decide(self, outcome: GeocodeOutcome, attempt: u32) -> RetryDecision {
        match outcome {
            GeocodeOutcome::Success(results) => RetryDecision::Resolve(Ok(results)),
            GeocodeOutcome::OverQuotaFailure if attempt <= self.max_retries => RetryDecision::Retry,
            GeocodeOutcome::OverQuotaFailure => {
                RetryDecision::Resolve(Err(GeocodeError::OverQuotaLimit))
            }
            GeocodeOutcome::AuthenticationFailure => {
                RetryDecision::Resolve(Err(GeocodeError::Authentication))
            }
            GeocodeOutcome::ConnectionFailure => {
                RetryDecision::Resolve(Err(GeocodeError::Connection))
            }
            GeocodeOutcome::NoResults => RetryDecision::Resolve(Err(GeocodeError::NoResults)),
            GeocodeOutcome::OtherError(message) => {
                RetryDecision::Resolve(Err(GeocodeError::Other(message)))
            }
        }
    }
}
