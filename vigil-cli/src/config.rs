//! Configuration module
//!
//! Handles CLI configuration: where the job API lives and how to poll it.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use vigil_client::JobApiClient;
use vigil_poller::PollConfig;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the job API
    pub api_url: String,
    /// Poll interval and wall-clock budget
    pub poll: PollConfig,
    /// Per-request HTTP timeout; bounds how long a single status check can take
    pub request_timeout: Duration,
}

impl Config {
    /// Build a job API client honouring the request timeout
    pub fn client(&self) -> Result<Arc<JobApiClient>> {
        let http_client = reqwest::Client::builder()
            .timeout(self.request_timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Arc::new(JobApiClient::with_client(
            self.api_url.clone(),
            http_client,
        )))
    }
}
