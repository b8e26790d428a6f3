//! Binary crate for the `weather` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive station and report selection
//! - Log file setup and exit status

use std::process::ExitCode;

use clap::Parser;

mod cli;
mod logging;
mod prompt;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cmd = cli::Cli::parse();
    cmd.run().await
}
