//! `relf strip` — strip a single module container file.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use relforge_codec::StripOutcome;

use crate::output::format_savings;

/// Arguments for the `strip` command.
#[derive(Args, Debug)]
pub struct StripArgs {
    /// Module file to strip.
    pub file: PathBuf,

    /// Output path; defaults to rewriting the input file in place.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Executes the `strip` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or written, or on an
/// internal rebuild fault.
pub fn execute(args: StripArgs) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("cannot read {}", args.file.display()))?;
    let target = args.output.unwrap_or_else(|| args.file.clone());

    match relforge_codec::strip(&bytes)? {
        StripOutcome::Stripped(stripped) => {
            let before = bytes.len() as u64;
            let after = stripped.len() as u64;
            std::fs::write(&target, stripped)
                .with_context(|| format!("cannot write {}", target.display()))?;
            println!("{}: {}", target.display(), format_savings(before, after));
        }
        StripOutcome::Unchanged => {
            // Not a parseable container: degrade to a verbatim copy.
            if target != args.file {
                std::fs::write(&target, &bytes)
                    .with_context(|| format!("cannot write {}", target.display()))?;
            }
            println!("{}: not a module container, left unchanged", args.file.display());
        }
    }
    Ok(())
}
