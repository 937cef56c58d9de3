//! In-memory job API
//!
//! A scripted stand-in for a remote job API. Every submitted job replays the
//! same sequence of status-check outcomes; once the script runs out the job
//! stays `Running`. Used by the CLI `simulate` command and by tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::debug;
use uuid::Uuid;
use vigil_core::domain::job::{JobHandle, JobRequest, PollResult};

use crate::error::{PollTransportError, SubmissionError};
use crate::repository::{JobStatusSource, JobSubmitter};

/// One scripted status-check outcome
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptStep {
    Status(PollResult),
    /// The status check fails before reaching the job
    TransportError(String),
}

/// Scripted in-memory implementation of both repository traits
#[derive(Debug, Default)]
pub struct InMemoryJobApi {
    script: Vec<ScriptStep>,
    reject_with: Option<String>,
    /// Script cursor per submitted job
    jobs: Mutex<HashMap<JobHandle, usize>>,
    submissions: AtomicU32,
    polls: AtomicU32,
}

impl InMemoryJobApi {
    /// Creates an API whose jobs replay `script`
    pub fn new(script: Vec<ScriptStep>) -> Self {
        Self {
            script,
            ..Default::default()
        }
    }

    /// Creates an API that rejects every submission
    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self {
            reject_with: Some(reason.into()),
            ..Default::default()
        }
    }

    /// Number of submission attempts seen, including rejected ones
    pub fn submissions(&self) -> u32 {
        self.submissions.load(Ordering::SeqCst)
    }

    /// Number of status checks seen across all jobs
    pub fn polls(&self) -> u32 {
        self.polls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl JobSubmitter for InMemoryJobApi {
    async fn submit(&self, request: JobRequest) -> Result<JobHandle, SubmissionError> {
        self.submissions.fetch_add(1, Ordering::SeqCst);

        if let Some(reason) = &self.reject_with {
            return Err(SubmissionError::Rejected(reason.clone()));
        }

        let handle = JobHandle::new(Uuid::new_v4().to_string());
        self.jobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(handle.clone(), 0);

        debug!("Accepted {} job as {}", request.kind, handle);
        Ok(handle)
    }
}

#[async_trait]
impl JobStatusSource for InMemoryJobApi {
    async fn poll(&self, handle: &JobHandle) -> Result<PollResult, PollTransportError> {
        self.polls.fetch_add(1, Ordering::SeqCst);

        let step = {
            let mut jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
            let cursor = jobs.get_mut(handle).ok_or_else(|| {
                PollTransportError::Unavailable(format!("unknown job {}", handle))
            })?;
            let step = self.script.get(*cursor).cloned();
            *cursor += 1;
            step
        };

        match step {
            Some(ScriptStep::Status(result)) => Ok(result),
            Some(ScriptStep::TransportError(message)) => {
                Err(PollTransportError::Unavailable(message))
            }
            None => Ok(PollResult::running()),
        }
    }
}
