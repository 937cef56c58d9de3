//! Job DTOs for the remote job API

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::job::{JobHandle, JobStatus, PollResult};

/// Response to a job submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitJobResponse {
    #[serde(alias = "job_id", alias = "diagnosis_id", alias = "task_id")]
    pub id: String,
    #[serde(default)]
    pub created_time: Option<String>,
}

impl SubmitJobResponse {
    pub fn handle(&self) -> JobHandle {
        JobHandle::new(self.id.clone())
    }
}

/// Status as it appears on the wire: either a numeric code or a name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatusRepr {
    Code(i64),
    Name(String),
}

impl From<&StatusRepr> for JobStatus {
    fn from(repr: &StatusRepr) -> Self {
        match repr {
            StatusRepr::Code(code) => JobStatus::from_code(*code),
            StatusRepr::Name(name) => JobStatus::from_name(name),
        }
    }
}

/// Response to a status check
///
/// Failure detail may arrive as `error`, `message` or both; `error` wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStatusResponse {
    pub status: StatusRepr,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl JobStatusResponse {
    pub fn job_status(&self) -> JobStatus {
        JobStatus::from(&self.status)
    }

    pub fn into_poll_result(self) -> PollResult {
        let status = self.job_status();
        PollResult::from_parts(status, self.result, self.error.or(self.message))
    }
}
