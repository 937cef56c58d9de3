//! Job command handlers
//!
//! Handles submitting a job and waiting for it, and one-off status checks.

use anyhow::{Context, Result};
use colored::*;
use serde_json::Value;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use vigil_core::domain::job::{JobHandle, JobRequest};
use vigil_poller::{
    HttpJobRepository, JobPoller, JobStatusSource, JobSubmitter, PollError, error_json,
    result_json,
};

use crate::config::Config;
use crate::output::{ProgressObserver, colorize_status, print_error, print_result};

/// Parse a single key=value pair
pub fn parse_key_val(s: &str) -> Result<(String, String)> {
    let pos = s
        .find('=')
        .ok_or_else(|| anyhow::anyhow!("invalid KEY=value: no `=` found in `{}`", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

/// Interpret a parameter value as JSON, falling back to a plain string
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Submit a job to the job API and wait for it
pub async fn run_job(
    config: &Config,
    kind: String,
    params: Vec<(String, String)>,
    json: bool,
) -> Result<()> {
    let repository = HttpJobRepository::new(config.client()?);

    let request = params
        .into_iter()
        .fold(JobRequest::new(kind), |request, (key, value)| {
            let value = parse_value(&value);
            request.with_parameter(key, value)
        });

    wait_and_report(config, request, &repository, &repository, json).await
}

/// Check a job's status once and print it
pub async fn show_status(config: &Config, handle: &str, json: bool) -> Result<()> {
    let client = config.client()?;
    let handle = JobHandle::from(handle);

    let response = client
        .get_job_status(&handle)
        .await
        .with_context(|| format!("Failed to fetch status of job {}", handle))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    let result = response.into_poll_result();
    println!("{}", "Job Status:".bold());
    println!("  Handle: {}", handle.to_string().cyan());
    println!("  Status: {}", colorize_status(result.status()));
    if let Some(error) = result.error() {
        println!("  Error:  {}", error.red());
    }
    if let Some(payload) = result.payload() {
        println!("\n{}", "Result:".bold());
        println!("{}", serde_json::to_string_pretty(payload)?);
    }

    Ok(())
}

/// Drive `request` to completion and report the outcome
///
/// Ctrl-C stops the wait; the remote job keeps running.
pub(super) async fn wait_and_report<S, P>(
    config: &Config,
    request: JobRequest,
    submitter: &S,
    source: &P,
    json: bool,
) -> Result<()>
where
    S: JobSubmitter + ?Sized,
    P: JobStatusSource + ?Sized,
{
    let mut poller = JobPoller::new(config.poll);
    if !json {
        poller = poller.with_observer(Arc::new(ProgressObserver));
    }

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    let interrupt_listener = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let outcome = poller
        .run_to_completion(request, submitter, source, &cancel)
        .await;
    interrupt_listener.abort();

    match outcome {
        Ok(result) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&result_json(&result))?);
            } else {
                print_result(&result);
            }
            Ok(())
        }
        Err(e) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&error_json(&e))?);
            } else {
                print_error(&e);
            }
            // Already reported; exit without a second message on stderr
            std::process::exit(exit_code(&e));
        }
    }
}

/// Process exit code for a wait that did not succeed
fn exit_code(error: &PollError) -> i32 {
    match error {
        PollError::Cancelled { .. } => 130,
        _ => 1,
    }
}
