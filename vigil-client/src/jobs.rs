//! Job-related API endpoints

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;
use vigil_core::domain::job::{JobHandle, JobRequest};
use vigil_core::dto::job::{JobStatusResponse, SubmitJobResponse};

use crate::JobApiClient;
use crate::error::Result;

#[derive(Serialize)]
struct SubmitJobBody<'a> {
    kind: &'a str,
    parameters: &'a HashMap<String, Value>,
}

impl JobApiClient {
    /// Submit a new job
    ///
    /// Performs exactly one request; retrying is left to the caller.
    ///
    /// # Returns
    /// The submission response carrying the job id
    pub async fn submit_job(&self, request: &JobRequest) -> Result<SubmitJobResponse> {
        let url = format!("{}/api/jobs", self.base_url);
        debug!("Submitting {} job to {}", request.kind, url);

        let response = self
            .client
            .post(&url)
            .json(&SubmitJobBody {
                kind: &request.kind,
                parameters: &request.parameters,
            })
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Get the current status of a job
    ///
    /// # Arguments
    /// * `handle` - The handle returned by [`JobApiClient::submit_job`]
    pub async fn get_job_status(&self, handle: &JobHandle) -> Result<JobStatusResponse> {
        let url = format!("{}/api/jobs/{}", self.base_url, handle);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }
}
