//! Job domain types

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

/// Parameters describing a unit of work to submit.
///
/// The poller never looks inside a request; only the job API adapters do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRequest {
    /// Kind of job, e.g. `diagnosis` or `inspection`
    pub kind: String,
    #[serde(default)]
    pub parameters: HashMap<String, Value>,
}

impl JobRequest {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            parameters: HashMap::new(),
        }
    }

    /// Adds a parameter to the request
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }
}

/// Opaque identifier of a submitted job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobHandle(String);

impl JobHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for JobHandle {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for JobHandle {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Remote job status as reported by a status check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Running,
    Succeeded,
    Failed,
    Unknown,
}

impl JobStatus {
    /// Returns true for statuses after which a job never changes again
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Succeeded | JobStatus::Failed)
    }

    /// Maps a numeric status code as reported by cluster diagnosis APIs.
    ///
    /// `0` is in progress, `1` finished, `2` failed.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => JobStatus::Running,
            1 => JobStatus::Succeeded,
            2 => JobStatus::Failed,
            _ => JobStatus::Unknown,
        }
    }

    /// Maps a status name, ignoring case. Unrecognized names are `Unknown`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "pending" | "queued" | "created" | "submitted" => JobStatus::Pending,
            "running" | "in_progress" | "processing" | "diagnosing" => JobStatus::Running,
            "succeeded" | "success" | "completed" | "finished" | "done" => JobStatus::Succeeded,
            "failed" | "failure" | "error" => JobStatus::Failed,
            _ => JobStatus::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Running => "running",
            JobStatus::Succeeded => "succeeded",
            JobStatus::Failed => "failed",
            JobStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single status check.
///
/// A payload is only ever attached to `Succeeded` and an error detail only to
/// `Failed`; the constructors are the only way to build one.
#[derive(Debug, Clone, PartialEq)]
pub struct PollResult {
    status: JobStatus,
    payload: Option<Value>,
    error: Option<String>,
}

impl PollResult {
    pub fn pending() -> Self {
        Self::non_terminal(JobStatus::Pending)
    }

    pub fn running() -> Self {
        Self::non_terminal(JobStatus::Running)
    }

    pub fn unknown() -> Self {
        Self::non_terminal(JobStatus::Unknown)
    }

    pub fn succeeded(payload: Option<Value>) -> Self {
        Self {
            status: JobStatus::Succeeded,
            payload,
            error: None,
        }
    }

    pub fn failed(detail: Option<String>) -> Self {
        Self {
            status: JobStatus::Failed,
            payload: None,
            error: detail,
        }
    }

    /// Builds a result from loose parts, dropping whichever field the status
    /// does not allow.
    pub fn from_parts(status: JobStatus, payload: Option<Value>, error: Option<String>) -> Self {
        match status {
            JobStatus::Succeeded => Self::succeeded(payload),
            JobStatus::Failed => Self::failed(error),
            other => Self::non_terminal(other),
        }
    }

    fn non_terminal(status: JobStatus) -> Self {
        Self {
            status,
            payload: None,
            error: None,
        }
    }

    pub fn status(&self) -> JobStatus {
        self.status
    }

    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn into_payload(self) -> Option<Value> {
        self.payload
    }

    pub fn into_error(self) -> Option<String> {
        self.error
    }
}

/// Successful outcome of driving a job to completion
#[derive(Debug, Clone)]
pub struct JobResult {
    pub handle: JobHandle,
    pub payload: Option<Value>,
    /// Number of status checks performed, including failed ones
    pub polls: u32,
    pub elapsed: Duration,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub completed_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_terminal_statuses() {
        assert!(JobStatus::Succeeded.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
        assert!(!JobStatus::Pending.is_terminal());
        assert!(!JobStatus::Running.is_terminal());
        assert!(!JobStatus::Unknown.is_terminal());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(JobStatus::from_code(0), JobStatus::Running);
        assert_eq!(JobStatus::from_code(1), JobStatus::Succeeded);
        assert_eq!(JobStatus::from_code(2), JobStatus::Failed);
        assert_eq!(JobStatus::from_code(7), JobStatus::Unknown);
        assert_eq!(JobStatus::from_code(-1), JobStatus::Unknown);
    }

    #[test]
    fn test_status_names() {
        assert_eq!(JobStatus::from_name("QUEUED"), JobStatus::Pending);
        assert_eq!(JobStatus::from_name("in_progress"), JobStatus::Running);
        assert_eq!(JobStatus::from_name(" Completed "), JobStatus::Succeeded);
        assert_eq!(JobStatus::from_name("error"), JobStatus::Failed);
        assert_eq!(JobStatus::from_name("paused"), JobStatus::Unknown);
    }

    #[test]
    fn test_from_parts_drops_disallowed_fields() {
        let result = PollResult::from_parts(
            JobStatus::Succeeded,
            Some(json!({"ok": true})),
            Some("ignored".to_string()),
        );
        assert_eq!(result.payload(), Some(&json!({"ok": true})));
        assert_eq!(result.error(), None);

        let result = PollResult::from_parts(
            JobStatus::Failed,
            Some(json!({"ignored": true})),
            Some("quota exceeded".to_string()),
        );
        assert_eq!(result.payload(), None);
        assert_eq!(result.error(), Some("quota exceeded"));

        let result = PollResult::from_parts(
            JobStatus::Running,
            Some(json!(1)),
            Some("ignored".to_string()),
        );
        assert_eq!(result, PollResult::running());
    }

    #[test]
    fn test_request_builder_and_serialization() {
        let request = JobRequest::new("diagnosis").with_parameter("cluster_id", "c-123");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["kind"], "diagnosis");
        assert_eq!(value["parameters"]["cluster_id"], "c-123");

        let parsed: JobRequest = serde_json::from_value(json!({"kind": "inspection"})).unwrap();
        assert!(parsed.parameters.is_empty());
    }

    #[test]
    fn test_handle_is_transparent() {
        let handle = JobHandle::from("diag-42");
        assert_eq!(serde_json::to_value(&handle).unwrap(), json!("diag-42"));
        assert_eq!(handle.to_string(), "diag-42");
    }
}
