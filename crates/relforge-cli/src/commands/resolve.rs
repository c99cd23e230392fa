//! `relf resolve` — print the resolved unit closure without assembling.

use std::path::PathBuf;

use clap::Args;

use relforge_assemble::DirManifestSource;
use relforge_common::constants::DEFAULT_CONFIG_FILE;

/// Arguments for the `resolve` command.
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Path to the release configuration file.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Also print the computed start order.
    #[arg(long)]
    pub order: bool,
}

/// Executes the `resolve` command.
///
/// # Errors
///
/// Returns an error if configuration loading or resolution fails.
pub fn execute(args: ResolveArgs) -> anyhow::Result<()> {
    let config = super::assemble::load_config(&args.config)?;
    let source = DirManifestSource::new(&config.units_dir);
    let resolved =
        relforge_resolver::resolve(&source, &config.root_names(), &config.mode_overrides())?;

    println!("{:<24} {:<12} {:<10} INCLUDED", "UNIT", "VERSION", "MODE");
    for unit in resolved.values() {
        println!(
            "{:<24} {:<12} {:<10} {}",
            unit.name,
            unit.version,
            unit.mode.to_string(),
            unit.included_units.join(",")
        );
    }

    if args.order {
        let order = relforge_resolver::start_order(&resolved)?;
        println!("\nstart order: {}", order.join(" -> "));
    }
    Ok(())
}
