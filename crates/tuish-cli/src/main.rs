//! tuish entry point

use anyhow::{anyhow, Result};
use clap::Parser;
use tuish_cli::{logging, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging is best effort; the menu works without it
    if let Err(e) = logging::init_logging(&cli.log_path(), cli.verbose) {
        eprintln!("Warning: {}", e.user_message());
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting tuish");

    match tuish_cli::run(&cli) {
        Ok(()) => {
            tracing::info!("tuish exited gracefully");
            Ok(())
        }
        Err(e) => {
            tracing::error!("tuish error: {}", e);
            Err(anyhow!(e.user_message()))
        }
    }
}
