//! Team presence command line client
//!
//! Run with:
//! ```bash
//! cargo run -p presence-cli -- login alice --password secret
//! cargo run -p presence-cli -- team --status working
//! ```
//!
//! Configuration is loaded from environment variables or a `.env` file.

use std::process::ExitCode;

use clap::Parser;
use presence_cli::Cli;
use presence_common::{try_init_tracing_with_config, ClientConfig, TracingConfig};
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    match presence_cli::run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
