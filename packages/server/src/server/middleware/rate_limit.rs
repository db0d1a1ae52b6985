// Rate limiting middleware using tower-governor
//
// Keyed on the peer address from ConnectInfo; forwarding headers are not
// consulted. Requests over the limit get a 429 before the API-key check or
// any extraction runs.
use anyhow::{bail, Context, Result};
use axum::Router;
use std::sync::Arc;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};

use crate::config::Config;

/// Token bucket settings for the governor layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    /// Sustained requests per second after the burst is spent
    pub requests_per_second: u64,

    /// Requests allowed in a burst
    pub burst_size: u32,
}

impl RateLimit {
    pub fn from_config(config: &Config) -> Self {
        Self {
            requests_per_second: config.rate_limit_per_second,
            burst_size: config.rate_limit_burst,
        }
    }

    /// Wrap `router` in a per-IP governor layer.
    pub fn apply<S>(self, router: Router<S>) -> Result<Router<S>>
    where
        S: Clone + Send + Sync + 'static,
    {
        let config = Arc::new(
            GovernorConfigBuilder::default()
                .per_millisecond(self.replenish_interval_ms()?)
                .burst_size(self.burst_size)
                .use_headers()
                .finish()
                .context("Rate limit must have a non-zero period and burst size")?,
        );

        Ok(router.layer(GovernorLayer { config }))
    }

    /// Governor refills one slot per period, so the rate becomes the gap
    /// between refills.
    fn replenish_interval_ms(&self) -> Result<u64> {
        if self.requests_per_second == 0 {
            bail!("Rate limit must allow at least one request per second");
        }
        Ok((1000 / self.requests_per_second).max(1))
    }
}

impl Default for RateLimit {
    fn default() -> Self {
        Self {
            requests_per_second: 10,
            burst_size: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_burst_is_rejected() {
        let limit = RateLimit {
            requests_per_second: 1,
            burst_size: 0,
        };
        assert!(limit.apply(Router::<()>::new()).is_err());
    }

    #[test]
    fn test_rate_is_requests_per_second() {
        let limit = |requests_per_second| RateLimit {
            requests_per_second,
            burst_size: 5,
        };
        assert_eq!(limit(10).replenish_interval_ms().unwrap(), 100);
        assert_eq!(limit(1).replenish_interval_ms().unwrap(), 1000);
        assert_eq!(limit(5000).replenish_interval_ms().unwrap(), 1);
        assert!(limit(0).replenish_interval_ms().is_err());
        assert!(limit(0).apply(Router::<()>::new()).is_err());
    }

    #[test]
    fn test_default_limit_applies() {
        assert!(RateLimit::default().apply(Router::<()>::new()).is_ok());
    }
}
