//! `relf assemble` — run the full release assembly pipeline.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;

use relforge_common::config::ReleaseConfig;
use relforge_common::constants::DEFAULT_CONFIG_FILE;

use crate::output::{format_bytes, format_savings};

/// Arguments for the `assemble` command.
#[derive(Args, Debug)]
pub struct AssembleArgs {
    /// Path to the release configuration file.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Strip module files even if the configuration says otherwise.
    #[arg(long)]
    pub strip: bool,

    /// Pack the assembled release into a .tar.gz archive.
    #[arg(long)]
    pub archive: bool,
}

/// Loads a release configuration file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_config(path: &Path) -> anyhow::Result<ReleaseConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read release config {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("malformed release config {}", path.display()))
}

/// Executes the `assemble` command.
///
/// # Errors
///
/// Returns an error if configuration loading or assembly fails.
pub fn execute(args: AssembleArgs) -> anyhow::Result<()> {
    let mut config = load_config(&args.config)?;
    config.strip |= args.strip;
    config.archive |= args.archive;
    tracing::info!(config = %args.config.display(), release = %config.name, "assembling");

    let report = relforge_assemble::assemble(&config)?;
    println!(
        "assembled {} {} -> {}",
        config.name,
        config.version,
        report.release_root.display()
    );
    println!(
        "  {} units, {} modules, {}",
        report.units,
        report.modules,
        format_bytes(report.bytes_out)
    );
    if config.strip {
        println!("  stripping: {}", format_savings(report.bytes_in, report.bytes_out));
    }
    if let Some(archive) = report.archive {
        println!("  archive: {}", archive.display());
    }
    Ok(())
}
