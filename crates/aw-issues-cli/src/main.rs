//! `aw-issues`: files agent-reported workflow events as GitHub issues.

mod bootstrap_helpers;
mod cli_args;
mod message_loader;
mod run_bridge;

use anyhow::Result;
use clap::Parser;

use crate::bootstrap_helpers::init_tracing;
use crate::cli_args::Cli;
use crate::run_bridge::run_cli;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    run_cli(cli).await
}
