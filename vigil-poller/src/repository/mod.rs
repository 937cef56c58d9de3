//! Repository layer
//!
//! Repositories are the poller's view of a remote job API: one call to
//! submit a job and one call to check it. They hold no business logic and
//! never sleep or retry.
//!
//! Both operations are trait-based so the poller can be driven by any
//! backend, including the in-memory one used for simulation and tests.

mod jobs;
mod memory;

// Re-export traits
pub use jobs::{JobStatusSource, JobSubmitter};

// Re-export implementations
pub use jobs::HttpJobRepository;
pub use memory::{InMemoryJobApi, ScriptStep};
