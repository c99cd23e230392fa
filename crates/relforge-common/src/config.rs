//! Release configuration model.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::UnitName;

/// A requested root unit with an optional explicit startup mode.
///
/// Modes stay as raw strings here; they are validated against the five-value
/// mode set during resolution so that a bad value names the offending unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootUnit {
    /// Name of the root unit.
    pub name: UnitName,
    /// Requested startup mode; defaults to `permanent` when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

/// Root configuration for a release build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseConfig {
    /// Release name, used for the output directory and launcher script.
    pub name: String,
    /// Release version string.
    pub version: String,
    /// Root units to resolve the closure from, in request order.
    pub roots: Vec<RootUnit>,
    /// Directory holding the packaged unit sources.
    #[serde(default = "default_units_dir")]
    pub units_dir: PathBuf,
    /// Directory the assembled release is written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Whether to strip non-essential chunks from module files.
    #[serde(default)]
    pub strip: bool,
    /// Whether to pack the assembled release into a `.tar.gz` archive.
    #[serde(default)]
    pub archive: bool,
}

fn default_units_dir() -> PathBuf {
    PathBuf::from(crate::constants::DEFAULT_UNITS_DIR)
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(crate::constants::DEFAULT_OUTPUT_DIR)
}

impl ReleaseConfig {
    /// Returns root names in request order.
    #[must_use]
    pub fn root_names(&self) -> Vec<UnitName> {
        self.roots.iter().map(|r| r.name.clone()).collect()
    }

    /// Returns the explicit mode overrides keyed by unit name.
    #[must_use]
    pub fn mode_overrides(&self) -> BTreeMap<UnitName, String> {
        self.roots
            .iter()
            .filter_map(|r| r.mode.clone().map(|m| (r.name.clone(), m)))
            .collect()
    }
}
