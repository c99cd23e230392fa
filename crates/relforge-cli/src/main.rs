//! # relf — relforge CLI
//!
//! Assembles deployable, self-contained releases of modular applications:
//! resolves the unit closure, lays out the versioned release tree, and
//! optionally strips module containers.

mod commands;
mod output;

use clap::Parser;

use crate::commands::Cli;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
        )
        .init();

    let cli = Cli::parse();
    commands::execute(cli)
}
