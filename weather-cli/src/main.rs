//! Binary crate for the `weather` dashboard.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive city search
//! - Text and terminal-UI rendering of the core view model

use clap::Parser;

mod app;
mod cli;
mod dashboard;
mod logging;
mod text;
mod ui;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    cmd.run().await
}
