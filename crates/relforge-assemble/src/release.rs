//! The emitted release manifest and content digests.
//!
//! Every assembled release carries a `release.json` describing the packaged
//! units, their startup modes, and SHA-256 digests of the module files that
//! ended up in the release.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use relforge_common::error::{ReleaseError, Result};
use relforge_common::types::{Sha256Digest, StartupMode, UnitName};

/// One module file as packaged into the release.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackagedModule {
    /// File name within the unit's module directory.
    pub file: String,
    /// Digest of the packaged (possibly stripped) file.
    pub digest: Sha256Digest,
    /// Size of the packaged file in bytes.
    pub size_bytes: u64,
}

/// One unit as packaged into the release.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackagedUnit {
    /// Unit name.
    pub name: UnitName,
    /// Unit version.
    pub version: String,
    /// Resolved startup mode.
    pub mode: StartupMode,
    /// Units loaded as part of this unit but not independently started.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included_units: Vec<UnitName>,
    /// Packaged module files.
    pub modules: Vec<PackagedModule>,
}

/// The manifest written to `releases/<version>/release.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseManifest {
    /// Release name.
    pub name: String,
    /// Release version.
    pub version: String,
    /// UTC timestamp of assembly.
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Start order of the units, dependencies first.
    pub start_order: Vec<UnitName>,
    /// Packaged units, name-sorted.
    pub units: Vec<PackagedUnit>,
}

impl ReleaseManifest {
    /// Serializes and writes the manifest to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn write(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ReleaseError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Computes the SHA-256 digest of a file.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn hash_file(path: &Path) -> Result<Sha256Digest> {
    let mut file = std::fs::File::open(path).map_err(|e| ReleaseError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = file.read(&mut buf).map_err(|e| ReleaseError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    let hex: String = hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect();
    Sha256Digest::from_hex(hex)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_file_matches_known_digest() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("data");
        std::fs::write(&path, b"abc").expect("write");
        let digest = hash_file(&path).expect("hash");
        // SHA-256("abc")
        assert_eq!(
            digest.as_hex(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn hash_file_missing_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = hash_file(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, ReleaseError::Io { .. }), "got: {err}");
    }

    #[test]
    fn manifest_round_trips_through_json() {
        let manifest = ReleaseManifest {
            name: "myapp".into(),
            version: "1.0.0".into(),
            created_at: chrono::Utc::now(),
            start_order: vec!["kernel".into(), "myapp".into()],
            units: vec![PackagedUnit {
                name: "kernel".into(),
                version: "3.0.0".into(),
                mode: StartupMode::Permanent,
                included_units: Vec::new(),
                modules: Vec::new(),
            }],
        };
        let json = serde_json::to_string(&manifest).expect("serialize");
        let parsed: ReleaseManifest = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed.units.len(), 1);
        assert_eq!(parsed.start_order, manifest.start_order);
    }
}
