use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use governor::clock::DefaultClock;
use governor::state::direct::NotKeyed;
use governor::state::InMemoryState;
use governor::{Quota, RateLimiter};

use crate::error::ConfigError;

pub const MIN_QUERIES_PER_SECOND: f64 = 1.0;
pub const MAX_QUERIES_PER_SECOND: f64 = 50.0;

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Async admission gate bounding the outgoing request rate.
///
/// No more than `queries_per_second` acquisitions complete within any
/// rolling one-second window, across all concurrent callers. Admission is
/// best-effort FIFO; no further fairness is guaranteed.
#[derive(Debug, Clone)]
pub struct Throttle {
    limiter: Arc<DirectRateLimiter>,
}

impl Throttle {
    pub fn new(queries_per_second: f64) -> Result<Self, ConfigError> {
        if !(MIN_QUERIES_PER_SECOND..=MAX_QUERIES_PER_SECOND).contains(&queries_per_second) {
            return Err(ConfigError::QueriesPerSecondOutOfRange);
        }

        Ok(Self {
            limiter: Arc::new(RateLimiter::direct(quota_from_rate(queries_per_second))),
        })
    }

    /// Suspends the caller until one more request is admissible, without
    /// blocking other tasks. Dropping the future before it resolves does
    /// not consume a slot.
    pub async fn acquire(&self) {
        self.limiter.until_ready().await;
    }
}

fn quota_from_rate(queries_per_second: f64) -> Quota {
    // Burst of one keeps acquisitions spaced a full period apart, so any
    // rolling one-second window admits at most `queries_per_second` calls.
    let period = Duration::from_secs_f64(1.0 / queries_per_second);
    let burst = NonZeroU32::new(1).expect("burst of one is non-zero");

    Quota::with_period(period)
        .expect("period is always greater than zero")
        .allow_burst(burst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn rejects_rates_outside_the_allowed_range() {
        for rate in [0.5, -2.0, 51.0, f64::NAN] {
            let error = Throttle::new(rate).expect_err("rate should be rejected");
            assert_eq!(
                error.to_string(),
                "Requests per second must be >= 1 and <= 50"
            );
        }
    }

    #[test]
    fn accepts_boundary_rates() {
        assert!(Throttle::new(1.0).is_ok());
        assert!(Throttle::new(50.0).is_ok());
        assert!(Throttle::new(2.5).is_ok());
    }

    #[tokio::test]
    async fn first_acquisition_is_immediate() {
        let throttle = Throttle::new(1.0).expect("valid rate");

        let started = Instant::now();
        throttle.acquire().await;
        assert!(started.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test]
    async fn acquisitions_are_spaced_by_the_configured_period() {
        let throttle = Throttle::new(50.0).expect("valid rate");

        // Period is 20ms; three acquisitions need at least two full periods
        // beyond the initial slot.
        let started = Instant::now();
        for _ in 0..3 {
            throttle.acquire().await;
        }
        assert!(started.elapsed() >= Duration::from_millis(35));
    }

    #[tokio::test]
    async fn a_dropped_pending_acquisition_does_not_consume_a_slot() {
        let throttle = Throttle::new(50.0).expect("valid rate");
        throttle.acquire().await;

        // Start and abandon several waits while no slot is free.
        for _ in 0..5 {
            let mut wait = std::pin::pin!(throttle.acquire());
            assert!(futures::poll!(wait.as_mut()).is_pending());
        }

        // Only completed acquisitions hold slots, so the next one clears
        // after a single 20ms period rather than six.
        let started = Instant::now();
        throttle.acquire().await;
        assert!(started.elapsed() < Duration::from_millis(100));
    }
}
