//! Outbound request throttling for the GitHub API

use anyhow::{bail, Result};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use std::num::NonZeroU32;
use std::time::Duration;

/// Token bucket rate limiter backed by `governor`
///
/// Refills at `requests_per_second` and allows bursts up to `burst_size`.
pub struct GithubRateLimiter {
    limiter: DefaultDirectRateLimiter,
}

impl GithubRateLimiter {
    /// Create a new rate limiter
    ///
    /// # Arguments
    /// * `requests_per_second` - Sustained request rate, must be positive
    /// * `burst_size` - Requests allowed back to back, must be at least 1
    pub fn new(requests_per_second: f64, burst_size: u32) -> Result<Self> {
        if !(requests_per_second.is_finite() && requests_per_second > 0.0) {
            bail!("requests_per_second must be positive, got {requests_per_second}");
        }
        let Some(burst) = NonZeroU32::new(burst_size) else {
            bail!("burst_size must be at least 1");
        };
        let Some(quota) = Quota::with_period(Duration::from_secs_f64(1.0 / requests_per_second))
        else {
            bail!("requests_per_second {requests_per_second} is too high");
        };

        Ok(Self {
            limiter: RateLimiter::direct(quota.allow_burst(burst)),
        })
    }

    /// Wait until a request may be sent
    pub async fn acquire(&self) {
        self.limiter.until_ready().await;
    }

    /// Take a token without waiting; false when the bucket is empty
    pub fn try_acquire(&self) -> bool {
        self.limiter.check().is_ok()
    }
}
