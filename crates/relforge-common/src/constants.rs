//! System-wide constants and default paths.

/// Default release configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "release.json";

/// Default directory holding packaged unit sources.
pub const DEFAULT_UNITS_DIR: &str = "units";

/// Default output directory for assembled releases.
pub const DEFAULT_OUTPUT_DIR: &str = "_release";

/// File name of a unit's manifest inside its source directory.
pub const UNIT_MANIFEST_FILE: &str = "unit.json";

/// File extension of compiled module container files.
pub const MODULE_EXTENSION: &str = "mod";

/// Directory inside a unit holding its compiled module files.
pub const MODULES_DIR: &str = "mod";

/// Directory inside a unit holding auxiliary support files, copied verbatim.
pub const SUPPORT_DIR: &str = "priv";

/// File name of the emitted release manifest.
pub const RELEASE_MANIFEST_FILE: &str = "release.json";

/// SHA-256 digest length in hex characters.
pub const SHA256_HEX_LENGTH: usize = 64;

/// Application name used in CLI output and manifests.
pub const APP_NAME: &str = "relforge";

/// Binary name for the CLI.
pub const BIN_NAME: &str = "relf";
