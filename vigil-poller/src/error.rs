//! Error types for the poller and its collaborators

use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use vigil_client::ClientError;
use vigil_core::domain::job::{JobHandle, JobStatus};

use crate::config::ConfigError;

/// A job could not be submitted. Never retried by the poller.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// The job API refused the request
    #[error("submission rejected: {0}")]
    Rejected(String),

    #[error(transparent)]
    Client(ClientError),
}

/// A status check could not be completed.
///
/// This says nothing about the job itself; the poller keeps waiting.
#[derive(Debug, Error)]
pub enum PollTransportError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("status endpoint unavailable: {0}")]
    Unavailable(String),
}

/// Terminal outcome of a poll loop other than success
#[derive(Debug, Error)]
pub enum PollError {
    #[error("invalid poll configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("job submission failed: {0}")]
    SubmissionFailed(#[source] SubmissionError),

    #[error("job {handle} failed: {detail}")]
    JobFailed { handle: JobHandle, detail: String },

    #[error("timed out after {elapsed:?} waiting for job {handle} (last status: {})", last_status_label(.last_status))]
    Timeout {
        handle: JobHandle,
        last_status: Option<JobStatus>,
        elapsed: Duration,
    },

    #[error("wait for job cancelled")]
    Cancelled { handle: Option<JobHandle> },
}

fn last_status_label(status: &Option<JobStatus>) -> &'static str {
    status.map(JobStatus::as_str).unwrap_or("none observed")
}

/// Category of a [`PollError`], for callers that report outcomes as data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PollErrorKind {
    Config,
    SubmissionFailed,
    JobFailed,
    Timeout,
    Cancelled,
}

impl PollError {
    pub fn kind(&self) -> PollErrorKind {
        match self {
            PollError::Config(_) => PollErrorKind::Config,
            PollError::SubmissionFailed(_) => PollErrorKind::SubmissionFailed,
            PollError::JobFailed { .. } => PollErrorKind::JobFailed,
            PollError::Timeout { .. } => PollErrorKind::Timeout,
            PollError::Cancelled { .. } => PollErrorKind::Cancelled,
        }
    }

    /// True when trying again later may succeed.
    ///
    /// Only a timeout qualifies: the job may still finish remotely. A failed
    /// job or a bad request will fail the same way again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PollError::Timeout { .. })
    }

    /// Handle of the job, when submission got that far
    pub fn handle(&self) -> Option<&JobHandle> {
        match self {
            PollError::JobFailed { handle, .. } | PollError::Timeout { handle, .. } => Some(handle),
            PollError::Cancelled { handle } => handle.as_ref(),
            PollError::Config(_) | PollError::SubmissionFailed(_) => None,
        }
    }
}
