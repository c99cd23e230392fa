//! Unit manifest model and the injected loading capability.

use serde::{Deserialize, Serialize};

use relforge_common::error::Result;
use relforge_common::types::UnitName;

/// The declared metadata of one packaged unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitManifest {
    /// Declared version of the unit.
    pub version: String,
    /// Units this unit requires at load time.
    #[serde(default)]
    pub dependencies: Vec<UnitName>,
    /// Units loaded as part of this unit but not independently started.
    #[serde(default)]
    pub included_units: Vec<UnitName>,
}

/// Capability for loading unit manifests.
///
/// The resolver never accesses storage directly; the surrounding pipeline
/// injects an implementation backed by the on-disk unit layout, and tests
/// inject an in-memory fake.
pub trait ManifestSource {
    /// Loads the manifest for the named unit.
    ///
    /// # Errors
    ///
    /// Returns `ReleaseError::ManifestLoad` if the manifest is missing or
    /// malformed.
    fn load_manifest(&self, unit: &str) -> Result<UnitManifest>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_deserializes_with_empty_lists() {
        let manifest: UnitManifest =
            serde_json::from_str(r#"{"version": "2.1.0"}"#).expect("valid manifest");
        assert_eq!(manifest.version, "2.1.0");
        assert!(manifest.dependencies.is_empty());
        assert!(manifest.included_units.is_empty());
    }

    #[test]
    fn manifest_deserializes_full_shape() {
        let manifest: UnitManifest = serde_json::from_str(
            r#"{
                "version": "0.3.1",
                "dependencies": ["kernel", "stdlib"],
                "included_units": ["kernel_helpers"]
            }"#,
        )
        .expect("valid manifest");
        assert_eq!(manifest.dependencies, vec!["kernel", "stdlib"]);
        assert_eq!(manifest.included_units, vec!["kernel_helpers"]);
    }

    #[test]
    fn manifest_rejects_wrong_shape() {
        let result: std::result::Result<UnitManifest, _> =
            serde_json::from_str(r#"{"version": 3}"#);
        assert!(result.is_err());
    }
}
