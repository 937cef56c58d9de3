//! Vigil CLI
//!
//! Command-line interface for submitting long-running jobs to a job API and
//! waiting for them to finish.

mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vigil_poller::PollConfig;

#[derive(Parser)]
#[command(name = "vigil")]
#[command(about = "Submit long-running jobs and wait for them", long_about = None)]
struct Cli {
    /// Job API URL
    #[arg(long, env = "VIGIL_API_URL", default_value = "http://localhost:8080")]
    api_url: String,

    /// Seconds between status checks
    #[arg(long, env = "DIAGNOSE_POLL_INTERVAL", default_value_t = 5)]
    poll_interval: u64,

    /// Seconds to wait for a job before giving up
    #[arg(long, env = "DIAGNOSE_MAX_WAIT", default_value_t = 600)]
    max_wait: u64,

    /// Timeout in seconds for each HTTP request to the job API
    #[arg(long, env = "VIGIL_REQUEST_TIMEOUT", default_value_t = 30)]
    request_timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vigil=info,vigil_poller=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config {
        api_url: cli.api_url,
        poll: PollConfig::new(
            Duration::from_secs(cli.poll_interval),
            Duration::from_secs(cli.max_wait),
        ),
        request_timeout: Duration::from_secs(cli.request_timeout),
    };
    debug!("Resolved configuration: {:?}", config);

    handle_command(cli.command, &config).await
}
