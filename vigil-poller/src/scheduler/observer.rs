//! Poll loop observer
//!
//! Optional hook for watching a poll loop from the outside, for example to
//! export metrics or to alert on a status endpoint that keeps failing. It
//! has no influence on control flow.

use vigil_core::domain::job::{JobHandle, PollResult};

use crate::error::PollTransportError;

/// Receives poll loop events. All methods default to doing nothing.
pub trait PollObserver: Send + Sync {
    /// The job was accepted and is about to be polled
    fn on_submitted(&self, _handle: &JobHandle) {}

    /// A status check succeeded
    fn on_status(&self, _handle: &JobHandle, _result: &PollResult) {}

    /// A status check failed and the loop will keep waiting
    ///
    /// `consecutive_failures` counts failures since the last successful check.
    fn on_transient_error(
        &self,
        _handle: &JobHandle,
        _error: &PollTransportError,
        _consecutive_failures: u32,
    ) {
    }
}

/// Observer that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PollObserver for NoopObserver {}
