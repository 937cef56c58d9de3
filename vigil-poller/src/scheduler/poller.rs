//! Job poller
//!
//! Submits one job and polls it on a fixed interval until it reaches a
//! terminal status, the wall-clock budget runs out, or the caller cancels.
//! All waiting is done on the tokio timer, so a long wait occupies no worker.

use std::sync::Arc;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use vigil_core::domain::job::{JobHandle, JobRequest, JobResult, JobStatus};

use crate::config::PollConfig;
use crate::error::PollError;
use crate::repository::{JobStatusSource, JobSubmitter};
use crate::scheduler::observer::{NoopObserver, PollObserver};

const MISSING_FAILURE_DETAIL: &str = "job failed without error detail";

/// Drives submitted jobs to completion
///
/// Holds configuration and an observer; every call to [`JobPoller::run_to_completion`]
/// is independent, so one poller can serve many concurrent jobs.
#[derive(Clone)]
pub struct JobPoller {
    config: PollConfig,
    observer: Arc<dyn PollObserver>,
}

impl JobPoller {
    /// Creates a new job poller
    pub fn new(config: PollConfig) -> Self {
        Self {
            config,
            observer: Arc::new(NoopObserver),
        }
    }

    /// Attaches an observer that is told about every poll loop event
    pub fn with_observer(mut self, observer: Arc<dyn PollObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Replaces the configuration, keeping the observer
    pub fn with_config(mut self, config: PollConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    /// Submits `request` and waits for the job to finish
    ///
    /// The configuration is validated before anything is submitted. A failed
    /// submission is returned as is and never retried. Status checks that
    /// fail in transport are treated as "still waiting". The loop stops at
    /// the first terminal status and never polls past the deadline.
    ///
    /// Cancelling `cancel` ends the wait at the next suspension point. The
    /// remote job is left running.
    pub async fn run_to_completion<S, P>(
        &self,
        request: JobRequest,
        submitter: &S,
        source: &P,
        cancel: &CancellationToken,
    ) -> Result<JobResult, PollError>
    where
        S: JobSubmitter + ?Sized,
        P: JobStatusSource + ?Sized,
    {
        self.config.validate()?;

        let started = Instant::now();
        let submitted_at = chrono::Utc::now();
        let kind = request.kind.clone();

        let submitted = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            submitted = submitter.submit(request) => Some(submitted),
        };

        let handle = match submitted {
            None => {
                info!("Cancelled while submitting {} job", kind);
                return Err(PollError::Cancelled { handle: None });
            }
            Some(Err(e)) => {
                warn!("Failed to submit {} job: {}", kind, e);
                return Err(PollError::SubmissionFailed(e));
            }
            Some(Ok(handle)) => handle,
        };

        info!(
            "Submitted {} job {} (interval: {:?}, max wait: {:?})",
            kind, handle, self.config.poll_interval, self.config.max_wait
        );
        self.observer.on_submitted(&handle);

        let deadline = Instant::now() + self.config.max_wait;
        let mut last_status: Option<JobStatus> = None;
        let mut polls: u32 = 0;
        let mut consecutive_failures: u32 = 0;

        loop {
            if Instant::now() >= deadline {
                let elapsed = started.elapsed();
                warn!(
                    "Job {} did not finish within {:?} (last status: {:?})",
                    handle, self.config.max_wait, last_status
                );
                return Err(PollError::Timeout {
                    handle,
                    last_status,
                    elapsed,
                });
            }

            let polled = tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                polled = source.poll(&handle) => Some(polled),
            };
            let Some(polled) = polled else {
                return Err(Self::cancelled(handle));
            };
            polls += 1;

            match polled {
                Err(e) => {
                    consecutive_failures += 1;
                    warn!(
                        "Status check for job {} failed ({} in a row): {}",
                        handle, consecutive_failures, e
                    );
                    self.observer
                        .on_transient_error(&handle, &e, consecutive_failures);
                }
                Ok(result) => {
                    consecutive_failures = 0;
                    self.observer.on_status(&handle, &result);

                    match result.status() {
                        JobStatus::Succeeded => {
                            let elapsed = started.elapsed();
                            info!(
                                "Job {} succeeded after {} poll(s) in {:?}",
                                handle, polls, elapsed
                            );
                            return Ok(JobResult {
                                handle,
                                payload: result.into_payload(),
                                polls,
                                elapsed,
                                submitted_at,
                                completed_at: chrono::Utc::now(),
                            });
                        }
                        JobStatus::Failed => {
                            let detail = result
                                .into_error()
                                .unwrap_or_else(|| MISSING_FAILURE_DETAIL.to_string());
                            warn!("Job {} failed: {}", handle, detail);
                            return Err(PollError::JobFailed { handle, detail });
                        }
                        status => {
                            debug!("Job {} is {}", handle, status);
                            last_status = Some(status);
                        }
                    }
                }
            }

            let pause = self
                .config
                .poll_interval
                .min(deadline.saturating_duration_since(Instant::now()));

            let slept = tokio::select! {
                biased;
                _ = cancel.cancelled() => false,
                _ = time::sleep(pause) => true,
            };
            if !slept {
                return Err(Self::cancelled(handle));
            }
        }
    }

    fn cancelled(handle: JobHandle) -> PollError {
        info!("Stopped waiting for job {}: cancelled", handle);
        PollError::Cancelled {
            handle: Some(handle),
        }
    }
}

/// Submits `request` and waits for the job to finish using `config`
///
/// Equivalent to [`JobPoller::run_to_completion`] with no observer and no
/// way to cancel.
pub async fn run_to_completion<S, P>(
    request: JobRequest,
    submitter: &S,
    source: &P,
    config: &PollConfig,
) -> Result<JobResult, PollError>
where
    S: JobSubmitter + ?Sized,
    P: JobStatusSource + ?Sized,
{
    JobPoller::new(*config)
        .run_to_completion(request, submitter, source, &CancellationToken::new())
        .await
}
