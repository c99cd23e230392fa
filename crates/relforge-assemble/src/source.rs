//! On-disk manifest source.
//!
//! Loads unit manifests from a units directory where each unit lives in
//! its own subdirectory with a `unit.json` manifest.

use std::path::{Path, PathBuf};

use relforge_common::constants::UNIT_MANIFEST_FILE;
use relforge_common::error::{ReleaseError, Result};
use relforge_resolver::manifest::{ManifestSource, UnitManifest};

/// A [`ManifestSource`] backed by the on-disk unit layout.
#[derive(Debug)]
pub struct DirManifestSource {
    /// Directory holding one subdirectory per unit.
    units_dir: PathBuf,
}

impl DirManifestSource {
    /// Creates a manifest source over the given units directory.
    #[must_use]
    pub fn new(units_dir: impl Into<PathBuf>) -> Self {
        Self {
            units_dir: units_dir.into(),
        }
    }

    /// Returns the source directory of the named unit.
    #[must_use]
    pub fn unit_dir(&self, unit: &str) -> PathBuf {
        self.units_dir.join(unit)
    }

    /// Returns the manifest path of the named unit.
    #[must_use]
    pub fn manifest_path(&self, unit: &str) -> PathBuf {
        self.unit_dir(unit).join(UNIT_MANIFEST_FILE)
    }
}

impl ManifestSource for DirManifestSource {
    fn load_manifest(&self, unit: &str) -> Result<UnitManifest> {
        let path = self.manifest_path(unit);
        tracing::debug!(unit = %unit, path = %path.display(), "loading unit manifest");
        let content = std::fs::read_to_string(&path).map_err(|e| ReleaseError::ManifestLoad {
            unit: unit.to_owned(),
            message: format!("{}: {e}", path.display()),
        })?;
        serde_json::from_str(&content).map_err(|e| ReleaseError::ManifestLoad {
            unit: unit.to_owned(),
            message: format!("malformed manifest: {e}"),
        })
    }
}

/// Writes a unit manifest. Used by tooling and tests to build unit trees.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file written.
pub fn write_manifest(units_dir: &Path, unit: &str, manifest: &UnitManifest) -> Result<()> {
    let dir = units_dir.join(unit);
    std::fs::create_dir_all(&dir).map_err(|e| ReleaseError::Io {
        path: dir.clone(),
        source: e,
    })?;
    let path = dir.join(UNIT_MANIFEST_FILE);
    let content = serde_json::to_string_pretty(manifest)?;
    std::fs::write(&path, content).map_err(|e| ReleaseError::Io {
        path,
        source: e,
    })
}
