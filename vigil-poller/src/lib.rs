//! Vigil Poller
//!
//! Drives "submit a job, then poll until it finishes" workflows against a
//! remote job API without tying up a worker for the duration of the wait.
//!
//! Architecture:
//! - Configuration: poll interval and wall-clock budget, from env or defaults
//! - Repositories: the submit/poll collaborators (HTTP and in-memory)
//! - Scheduler: the poll loop itself and its observer hook
//! - Tool: exposes the poller as a single JSON-in, JSON-out operation
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use vigil_client::JobApiClient;
//! use vigil_core::domain::job::JobRequest;
//! use vigil_poller::{HttpJobRepository, PollConfig, run_to_completion};
//!
//! # async fn example() -> Result<(), vigil_poller::PollError> {
//! let repository = HttpJobRepository::new(Arc::new(JobApiClient::new("http://localhost:8080")));
//! let request = JobRequest::new("diagnosis").with_parameter("cluster_id", "c-123");
//!
//! let result = run_to_completion(request, &repository, &repository, &PollConfig::default()).await?;
//! println!("{} finished after {} polls", result.handle, result.polls);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod repository;
pub mod scheduler;
pub mod tool;

pub use config::{ConfigError, PollConfig};
pub use error::{PollError, PollErrorKind, PollTransportError, SubmissionError};
pub use repository::{HttpJobRepository, InMemoryJobApi, JobStatusSource, JobSubmitter, ScriptStep};
pub use scheduler::{JobPoller, NoopObserver, PollObserver, run_to_completion};
pub use tool::{PollingTool, ToolDefinition, ToolOutput, error_json, result_json};
