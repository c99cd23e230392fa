//! Domain primitive types used across the relforge workspace.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ReleaseError;

/// Name of a packaged unit. Unique within a release.
pub type UnitName = String;

/// How the surrounding runtime should start a unit.
///
/// The resolver only validates membership in this set; it does not
/// interpret the semantics of the individual modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartupMode {
    /// The unit is started and must stay up for the release to be healthy.
    Permanent,
    /// The unit is started; abnormal exit takes the release down.
    Transient,
    /// The unit is started; any exit is tolerated.
    Temporary,
    /// The unit's code is loaded but the unit is not started.
    Load,
    /// The unit is included but neither loaded nor started.
    None,
}

impl StartupMode {
    /// Parses a mode string for the given unit.
    ///
    /// # Errors
    ///
    /// Returns `ReleaseError::InvalidMode` if `mode` is not one of
    /// `permanent`, `transient`, `temporary`, `load`, `none`.
    pub fn parse_for_unit(unit: &str, mode: &str) -> crate::error::Result<Self> {
        mode.parse().map_err(|()| ReleaseError::InvalidMode {
            unit: unit.to_owned(),
            mode: mode.to_owned(),
        })
    }
}

impl Default for StartupMode {
    fn default() -> Self {
        Self::Permanent
    }
}

impl FromStr for StartupMode {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "permanent" => Ok(Self::Permanent),
            "transient" => Ok(Self::Transient),
            "temporary" => Ok(Self::Temporary),
            "load" => Ok(Self::Load),
            "none" => Ok(Self::None),
            _ => Err(()),
        }
    }
}

impl fmt::Display for StartupMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Permanent => write!(f, "permanent"),
            Self::Transient => write!(f, "transient"),
            Self::Temporary => write!(f, "temporary"),
            Self::Load => write!(f, "load"),
            Self::None => write!(f, "none"),
        }
    }
}

/// A fully resolved unit included in a release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// Unit name, unique within the release.
    pub name: UnitName,
    /// Declared version string from the unit's manifest.
    pub version: String,
    /// Resolved startup mode.
    pub mode: StartupMode,
    /// Units loaded as part of this unit but not independently started.
    /// Empty when the manifest declares none.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included_units: Vec<UnitName>,
    /// Units this unit requires at load time.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<UnitName>,
}

/// The complete closure of a resolution request: every transitive manifest
/// dependency of every requested root, each exactly once, keyed by name.
///
/// `BTreeMap` gives callers name-sorted iteration for deterministic output.
pub type ResolvedSet = BTreeMap<UnitName, Unit>;

/// SHA-256 digest used for content verification of packaged files.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sha256Digest(String);

impl Sha256Digest {
    /// Creates a digest from a hex-encoded string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a valid 64-character hex string.
    pub fn from_hex(hex: impl Into<String>) -> crate::error::Result<Self> {
        let hex = hex.into();
        if hex.len() != crate::constants::SHA256_HEX_LENGTH
            || !hex.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Err(ReleaseError::Config {
                message: format!("invalid SHA-256 hex string: {hex}"),
            });
        }
        Ok(Self(hex))
    }

    /// Returns the hex-encoded digest string.
    #[must_use]
    pub fn as_hex(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sha256:{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parses_all_valid_values() {
        for (s, mode) in [
            ("permanent", StartupMode::Permanent),
            ("transient", StartupMode::Transient),
            ("temporary", StartupMode::Temporary),
            ("load", StartupMode::Load),
            ("none", StartupMode::None),
        ] {
            assert_eq!(StartupMode::parse_for_unit("u", s).expect(s), mode);
        }
    }

    #[test]
    fn mode_rejects_unknown_value() {
        let err = StartupMode::parse_for_unit("kernel", "eventually").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("eventually"), "got: {msg}");
        assert!(msg.contains("kernel"), "got: {msg}");
    }

    #[test]
    fn mode_is_case_sensitive() {
        assert!(StartupMode::parse_for_unit("u", "Permanent").is_err());
    }

    #[test]
    fn mode_round_trips_through_display() {
        let mode: StartupMode = "transient".parse().expect("parse");
        assert_eq!(mode.to_string(), "transient");
    }

    #[test]
    fn mode_defaults_to_permanent() {
        assert_eq!(StartupMode::default(), StartupMode::Permanent);
    }

    #[test]
    fn digest_rejects_short_hex() {
        assert!(Sha256Digest::from_hex("abc123").is_err());
    }

    #[test]
    fn digest_accepts_full_hex() {
        let digest = Sha256Digest::from_hex("a".repeat(64)).expect("valid");
        assert_eq!(digest.as_hex().len(), 64);
        assert!(digest.to_string().starts_with("sha256:"));
    }
}
