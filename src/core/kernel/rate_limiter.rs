use crate::core::errors::ExchangeError;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as DirectLimiter};
use nonzero_ext::nonzero;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Default pacing: ten calls per second
pub const DEFAULT_CALLS_PER_SECOND: u32 = 10;

/// Minimum spacing between dispatches on one gateway.
///
/// The quota holds a single cell that replenishes once per `min_interval`,
/// so a dispatch is admitted only after the interval has passed since the
/// previous one. This is a floor on spacing, not a burst allowance. The
/// check-and-advance is atomic, so clones of a gateway running on several
/// tasks are serialized onto the same floor.
#[derive(Clone)]
pub struct RateLimiter {
    limiter: Arc<DirectLimiter<NotKeyed, InMemoryState, DefaultClock>>,
    min_interval: Duration,
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("min_interval", &self.min_interval)
            .finish_non_exhaustive()
    }
}

impl RateLimiter {
    /// Create a limiter enforcing `min_interval` between dispatches
    pub fn new(min_interval: Duration) -> Result<Self, ExchangeError> {
        let quota = Quota::with_period(min_interval)
            .ok_or_else(|| {
                ExchangeError::ConfigurationError(
                    "Minimum request interval must be greater than zero".to_string(),
                )
            })?
            .allow_burst(nonzero!(1u32));

        Ok(Self {
            limiter: Arc::new(DirectLimiter::direct(quota)),
            min_interval,
        })
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Wait until a dispatch is allowed, then claim the slot
    pub async fn acquire(&self) {
        if self.limiter.check().is_err() {
            debug!(
                min_interval_ms = self.min_interval.as_millis() as u64,
                "Pacing request"
            );
            self.limiter.until_ready().await;
        }
    }
}

/// Spacing that corresponds to `calls` per second
pub fn interval_for_rate(calls: u32) -> Duration {
    Duration::from_secs(1) / calls.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_default_rate_is_a_100ms_floor() {
        assert_eq!(
            interval_for_rate(DEFAULT_CALLS_PER_SECOND),
            Duration::from_millis(100)
        );
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        assert!(RateLimiter::new(Duration::ZERO).is_err());
    }

    #[tokio::test]
    async fn test_first_acquire_is_immediate() {
        let limiter = RateLimiter::new(Duration::from_secs(5)).unwrap();
        let start = Instant::now();
        limiter.acquire().await;
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_consecutive_acquires_are_spaced() {
        let limiter = RateLimiter::new(Duration::from_millis(100)).unwrap();
        limiter.acquire().await;
        let first = Instant::now();
        limiter.acquire().await;
        // small tolerance for clock source differences
        assert!(first.elapsed() >= Duration::from_millis(95));
    }

    #[tokio::test]
    async fn test_clones_share_the_floor() {
        let limiter = RateLimiter::new(Duration::from_millis(100)).unwrap();
        let clone = limiter.clone();
        limiter.acquire().await;
        let first = Instant::now();
        clone.acquire().await;
        assert!(first.elapsed() >= Duration::from_millis(95));
    }
}
