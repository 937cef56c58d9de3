//! Vigil HTTP Client
//!
//! A small, type-safe HTTP client for a remote job API: submit a job, then
//! check its status by handle.
//!
//! # Example
//!
//! ```no_run
//! use vigil_client::JobApiClient;
//! use vigil_core::domain::job::JobRequest;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = JobApiClient::new("http://localhost:8080");
//!
//!     let submitted = client
//!         .submit_job(&JobRequest::new("diagnosis").with_parameter("cluster_id", "c-123"))
//!         .await?;
//!
//!     let status = client.get_job_status(&submitted.handle()).await?;
//!     println!("Job {} is {}", submitted.id, status.job_status());
//!     Ok(())
//! }
//! ```

pub mod error;
mod jobs;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use vigil_core::dto::job::{JobStatusResponse, SubmitJobResponse};

use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the job API
#[derive(Debug, Clone)]
pub struct JobApiClient {
    /// Base URL of the job API (e.g., "http://localhost:8080")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl JobApiClient {
    /// Create a new job API client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the job API (e.g., "http://localhost:8080")
    ///
    /// # Example
    /// ```
    /// use vigil_client::JobApiClient;
    ///
    /// let client = JobApiClient::new("http://localhost:8080");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Create a new job API client with a custom HTTP client
    ///
    /// Status checks must return promptly, so callers polling long-running
    /// jobs should configure a request timeout here.
    ///
    /// # Example
    /// ```
    /// use vigil_client::JobApiClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = JobApiClient::with_client("http://localhost:8080", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the job API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check the status code and deserialize the JSON body
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}
