//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod job;
mod simulate;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Submit a job and wait for it to finish
    Run {
        /// Kind of job, e.g. diagnosis or inspection
        #[arg(short, long)]
        kind: String,

        /// Parameters as key=value pairs; values are parsed as JSON when possible
        #[arg(short, long, value_parser = job::parse_key_val)]
        param: Vec<(String, String)>,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check the status of a job once
    Status {
        /// Job handle returned on submission
        handle: String,

        /// Print the response as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the poller against a simulated in-memory job API
    Simulate {
        /// Status checks reporting pending
        #[arg(long, default_value_t = 1)]
        pending: usize,

        /// Status checks reporting running
        #[arg(long, default_value_t = 2)]
        running: usize,

        /// Status checks failing in transport
        #[arg(long, default_value_t = 0)]
        flaky: usize,

        /// How the simulated job ends
        #[arg(long, value_enum, default_value_t = simulate::Outcome::Succeed)]
        outcome: simulate::Outcome,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Run { kind, param, json } => job::run_job(config, kind, param, json).await,
        Commands::Status { handle, json } => job::show_status(config, &handle, json).await,
        Commands::Simulate {
            pending,
            running,
            flaky,
            outcome,
            json,
        } => {
            let script = simulate::build_script(pending, running, flaky, outcome);
            simulate::run_simulation(config, script, json).await
        }
    }
}
