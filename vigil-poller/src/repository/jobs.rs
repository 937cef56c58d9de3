//! Jobs repository
//!
//! Submission and status checks against the job API:
//! - Submitting a job and returning its handle
//! - Fetching the current status of a handle

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;
use vigil_client::JobApiClient;
use vigil_core::domain::job::{JobHandle, JobRequest, PollResult};

use crate::error::{PollTransportError, SubmissionError};

/// Submits jobs to a remote API
#[async_trait]
pub trait JobSubmitter: Send + Sync {
    /// Submits a job once
    ///
    /// Implementations must not retry or sleep.
    ///
    /// # Arguments
    /// * `request` - The job to submit
    async fn submit(&self, request: JobRequest) -> Result<JobHandle, SubmissionError>;
}

/// Reports the status of submitted jobs
#[async_trait]
pub trait JobStatusSource: Send + Sync {
    /// Checks the status of a job once
    ///
    /// Implementations must return promptly and must not sleep. A transport
    /// failure is reported as an error, never as a `Failed` status.
    ///
    /// # Arguments
    /// * `handle` - The handle returned on submission
    async fn poll(&self, handle: &JobHandle) -> Result<PollResult, PollTransportError>;
}

/// HTTP implementation of both repository traits
#[derive(Debug, Clone)]
pub struct HttpJobRepository {
    client: Arc<JobApiClient>,
}

impl HttpJobRepository {
    /// Creates a new HTTP job repository
    ///
    /// # Arguments
    /// * `client` - Shared job API client
    pub fn new(client: Arc<JobApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl JobSubmitter for HttpJobRepository {
    async fn submit(&self, request: JobRequest) -> Result<JobHandle, SubmissionError> {
        let response = self
            .client
            .submit_job(&request)
            .await
            .map_err(|e| {
                if e.is_client_error() {
                    SubmissionError::Rejected(e.to_string())
                } else {
                    SubmissionError::Client(e)
                }
            })?;

        debug!("Job API accepted {} job as {}", request.kind, response.id);
        Ok(response.handle())
    }
}

#[async_trait]
impl JobStatusSource for HttpJobRepository {
    async fn poll(&self, handle: &JobHandle) -> Result<PollResult, PollTransportError> {
        let response = self.client.get_job_status(handle).await?;
        Ok(response.into_poll_result())
    }
}
