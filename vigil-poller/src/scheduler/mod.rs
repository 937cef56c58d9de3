//! Scheduler layer
//!
//! Drives a single submitted job from submission to a terminal status,
//! a timeout, or cancellation. Each invocation owns its handle and deadline,
//! so any number of them can run concurrently on the same runtime.

mod observer;
pub mod poller;

pub use observer::{NoopObserver, PollObserver};
pub use poller::{JobPoller, run_to_completion};
