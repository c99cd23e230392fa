//! CLI command definitions and dispatch.

pub mod assemble;
pub mod resolve;
pub mod strip;

use clap::{Parser, Subcommand};

/// relforge — release assembly for modular applications.
#[derive(Parser, Debug)]
#[command(name = "relf", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Assemble a release from a release configuration file.
    Assemble(assemble::AssembleArgs),
    /// Resolve and print the unit closure without assembling.
    Resolve(resolve::ResolveArgs),
    /// Strip non-essential chunks from a single module file.
    Strip(strip::StripArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Assemble(args) => assemble::execute(args),
        Command::Resolve(args) => resolve::execute(args),
        Command::Strip(args) => strip::execute(args),
    }
}
