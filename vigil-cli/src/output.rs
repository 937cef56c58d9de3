//! Terminal output helpers

use colored::*;
use vigil_core::domain::job::{JobHandle, JobResult, JobStatus, PollResult};
use vigil_poller::{PollError, PollObserver, PollTransportError};

/// Prints poll loop progress to stderr as it happens
pub struct ProgressObserver;

impl PollObserver for ProgressObserver {
    fn on_submitted(&self, handle: &JobHandle) {
        eprintln!("{} {}", "Submitted job".bold(), handle.to_string().cyan());
    }

    fn on_status(&self, handle: &JobHandle, result: &PollResult) {
        eprintln!("  {} {}", handle.to_string().dimmed(), colorize_status(result.status()));
    }

    fn on_transient_error(
        &self,
        handle: &JobHandle,
        error: &PollTransportError,
        consecutive_failures: u32,
    ) {
        eprintln!(
            "  {} {} ({} in a row): {}",
            handle.to_string().dimmed(),
            "status check failed".yellow(),
            consecutive_failures,
            error
        );
    }
}

pub fn colorize_status(status: JobStatus) -> colored::ColoredString {
    let status_str = status.to_string();
    match status {
        JobStatus::Pending => status_str.yellow(),
        JobStatus::Running => status_str.cyan(),
        JobStatus::Succeeded => status_str.green(),
        JobStatus::Failed => status_str.red(),
        JobStatus::Unknown => status_str.dimmed(),
    }
}

pub fn print_result(result: &JobResult) {
    println!("{}", "Job succeeded".green().bold());
    println!("  Handle:    {}", result.handle.to_string().cyan());
    println!("  Polls:     {}", result.polls);
    println!("  Elapsed:   {:.1}s", result.elapsed.as_secs_f64());
    println!(
        "  Submitted: {}",
        result.submitted_at.format("%Y-%m-%d %H:%M:%S")
    );
    println!(
        "  Completed: {}",
        result.completed_at.format("%Y-%m-%d %H:%M:%S")
    );

    if let Some(payload) = &result.payload {
        println!("\n{}", "Result:".bold());
        match serde_json::to_string_pretty(payload) {
            Ok(pretty) => println!("{}", pretty),
            Err(_) => println!("{}", payload),
        }
    }
}

pub fn print_error(error: &PollError) {
    let headline = match error {
        PollError::Config(_) => "Invalid configuration".red(),
        PollError::SubmissionFailed(_) => "Submission failed".red(),
        PollError::JobFailed { .. } => "Job failed".red(),
        PollError::Timeout { .. } => "Timed out".yellow(),
        PollError::Cancelled { .. } => "Cancelled".dimmed(),
    };

    eprintln!("{}: {}", headline.bold(), error);
    if error.is_retryable() {
        eprintln!(
            "{}",
            "The job may still be running remotely; try again later.".dimmed()
        );
    }
}
