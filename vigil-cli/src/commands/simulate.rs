//! Simulation command
//!
//! Runs the real poller against an in-memory job API with a scripted status
//! sequence. Useful for trying poll settings without a live backend.

use anyhow::Result;
use clap::ValueEnum;
use serde_json::json;
use vigil_core::domain::job::{JobRequest, PollResult};
use vigil_poller::{InMemoryJobApi, ScriptStep};

use crate::commands::job::wait_and_report;
use crate::config::Config;

/// How a simulated job ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Outcome {
    /// Reports success with a small payload
    Succeed,
    /// Reports failure with an error detail
    Fail,
    /// Never finishes
    Hang,
}

/// Build the status sequence for a simulated job
///
/// Pending checks come first, then transport failures, then running checks,
/// then the terminal outcome (if any).
pub fn build_script(pending: usize, running: usize, flaky: usize, outcome: Outcome) -> Vec<ScriptStep> {
    let mut script = Vec::with_capacity(pending + running + flaky + 1);

    script.extend((0..pending).map(|_| ScriptStep::Status(PollResult::pending())));
    script.extend(
        (0..flaky).map(|i| ScriptStep::TransportError(format!("simulated network error #{}", i + 1))),
    );
    script.extend((0..running).map(|_| ScriptStep::Status(PollResult::running())));

    match outcome {
        Outcome::Succeed => script.push(ScriptStep::Status(PollResult::succeeded(Some(json!({
            "simulated": true,
            "checks": pending + flaky + running + 1,
        }))))),
        Outcome::Fail => script.push(ScriptStep::Status(PollResult::failed(Some(
            "simulated job failure".to_string(),
        )))),
        Outcome::Hang => {}
    }

    script
}

/// Run the poller against an in-memory job API replaying `script`
pub async fn run_simulation(config: &Config, script: Vec<ScriptStep>, json: bool) -> Result<()> {
    let api = InMemoryJobApi::new(script);
    let request = JobRequest::new("simulation");

    wait_and_report(config, request, &api, &api, json).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_script_order() {
        let script = build_script(1, 1, 1, Outcome::Fail);
        assert_eq!(script.len(), 4);
        assert_eq!(script[0], ScriptStep::Status(PollResult::pending()));
        assert!(matches!(script[1], ScriptStep::TransportError(_)));
        assert_eq!(script[2], ScriptStep::Status(PollResult::running()));
        assert_eq!(
            script[3],
            ScriptStep::Status(PollResult::failed(Some("simulated job failure".to_string())))
        );
    }

    #[test]
    fn test_hang_has_no_terminal_step() {
        let script = build_script(0, 2, 0, Outcome::Hang);
        assert_eq!(script.len(), 2);
    }
}
