//! Poller configuration
//!
//! Defines the timing parameters of a poll loop: how often to check a job and
//! how long to wait for it in total.

use std::time::Duration;
use thiserror::Error;

/// Default delay between two status checks
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Default wall-clock budget for submit, poll and wait together
pub const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(600);

/// Longest wall-clock budget a poll loop accepts (30 days)
pub const MAX_WAIT_LIMIT: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// Invalid poll configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("poll_interval must be greater than 0")]
    ZeroPollInterval,

    #[error("max_wait ({max_wait:?}) must be at least poll_interval ({poll_interval:?})")]
    MaxWaitBelowInterval {
        max_wait: Duration,
        poll_interval: Duration,
    },

    #[error("max_wait ({max_wait:?}) must not exceed {limit:?}")]
    MaxWaitTooLarge { max_wait: Duration, limit: Duration },
}

/// Poll loop configuration
///
/// The interval is fixed; there is no backoff and no attempt limit. The loop
/// ends when the job reaches a terminal status or `max_wait` elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Delay between successive status checks
    pub poll_interval: Duration,

    /// Total time allowed from submission to a final outcome
    pub max_wait: Duration,
}

impl PollConfig {
    pub fn new(poll_interval: Duration, max_wait: Duration) -> Self {
        Self {
            poll_interval,
            max_wait,
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - DIAGNOSE_POLL_INTERVAL (optional, seconds, default: 5)
    /// - DIAGNOSE_MAX_WAIT (optional, seconds, default: 600)
    ///
    /// Missing or unparsable values fall back to the defaults. The result is
    /// not validated here; the poller validates before submitting.
    pub fn from_env() -> Self {
        let poll_interval = std::env::var("DIAGNOSE_POLL_INTERVAL")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_POLL_INTERVAL);

        let max_wait = std::env::var("DIAGNOSE_MAX_WAIT")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_MAX_WAIT);

        Self {
            poll_interval,
            max_wait,
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval.is_zero() {
            return Err(ConfigError::ZeroPollInterval);
        }

        if self.max_wait < self.poll_interval {
            return Err(ConfigError::MaxWaitBelowInterval {
                max_wait: self.max_wait,
                poll_interval: self.poll_interval,
            });
        }

        if self.max_wait > MAX_WAIT_LIMIT {
            return Err(ConfigError::MaxWaitTooLarge {
                max_wait: self.max_wait,
                limit: MAX_WAIT_LIMIT,
            });
        }

        Ok(())
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL, DEFAULT_MAX_WAIT)
    }
}
