//! Versioned on-disk layout of an assembled release.
//!
//! ```text
//! <output>/<name>-<version>/
//!   lib/<unit>-<vsn>/mod/*.mod     compiled modules (possibly stripped)
//!   lib/<unit>-<vsn>/priv/...      support files, copied verbatim
//!   releases/<version>/release.json
//!   bin/<name>                     launcher script
//! ```

use std::path::{Path, PathBuf};

use relforge_common::constants::RELEASE_MANIFEST_FILE;
use relforge_common::error::{ReleaseError, Result};

/// Path layout of one release under the output directory.
#[derive(Debug)]
pub struct ReleaseLayout {
    /// Root directory of the assembled release.
    root: PathBuf,
    /// Release version string.
    version: String,
}

impl ReleaseLayout {
    /// Creates the release skeleton under `output_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directories cannot be created.
    pub fn create(output_dir: &Path, name: &str, version: &str) -> Result<Self> {
        let root = output_dir.join(format!("{name}-{version}"));
        tracing::info!(root = %root.display(), "creating release layout");
        let layout = Self {
            root,
            version: version.to_owned(),
        };
        for dir in [layout.lib_dir(), layout.releases_dir(), layout.bin_dir()] {
            std::fs::create_dir_all(&dir).map_err(|e| ReleaseError::Io {
                path: dir.clone(),
                source: e,
            })?;
        }
        Ok(layout)
    }

    /// Returns the release root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the `lib/` directory holding all packaged units.
    #[must_use]
    pub fn lib_dir(&self) -> PathBuf {
        self.root.join("lib")
    }

    /// Returns the versioned directory of one packaged unit.
    #[must_use]
    pub fn unit_dir(&self, unit: &str, unit_version: &str) -> PathBuf {
        self.lib_dir().join(format!("{unit}-{unit_version}"))
    }

    /// Returns the versioned `releases/` metadata directory.
    #[must_use]
    pub fn releases_dir(&self) -> PathBuf {
        self.root.join("releases").join(&self.version)
    }

    /// Returns the path of the emitted release manifest.
    #[must_use]
    pub fn release_manifest_path(&self) -> PathBuf {
        self.releases_dir().join(RELEASE_MANIFEST_FILE)
    }

    /// Returns the `bin/` directory for launcher scripts.
    #[must_use]
    pub fn bin_dir(&self) -> PathBuf {
        self.root.join("bin")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_builds_skeleton_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let layout = ReleaseLayout::create(dir.path(), "myapp", "1.0.0").expect("create");
        assert!(layout.lib_dir().is_dir());
        assert!(layout.releases_dir().is_dir());
        assert!(layout.bin_dir().is_dir());
        assert!(layout.root().ends_with("myapp-1.0.0"));
    }

    #[test]
    fn unit_dir_is_versioned() {
        let dir = tempfile::tempdir().expect("tempdir");
        let layout = ReleaseLayout::create(dir.path(), "myapp", "1.0.0").expect("create");
        let unit = layout.unit_dir("kernel", "3.2.1");
        assert!(unit.ends_with("lib/kernel-3.2.1"));
    }

    #[test]
    fn release_manifest_lives_under_versioned_releases() {
        let dir = tempfile::tempdir().expect("tempdir");
        let layout = ReleaseLayout::create(dir.path(), "myapp", "2.0.0").expect("create");
        assert!(
            layout
                .release_manifest_path()
                .ends_with("releases/2.0.0/release.json")
        );
    }
}
