//! goost-run binary entry point.
//!
//! Parses command-line arguments with clap, initializes the tracing
//! subscriber, and hands off to [`Cli::run`], whose result becomes the
//! process exit status.

mod cli;
mod logging;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    logging::init_tracing()?;
    tracing::debug!(?cli, "parsed command line");

    Ok(cli.run().await)
}
