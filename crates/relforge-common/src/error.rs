//! Unified error types for the relforge workspace.
//!
//! Each higher-level crate reports its failures through these shared
//! variants; the CLI decides whether a failure aborts the whole release
//! build or only skips the offending unit.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum ReleaseError {
    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// A unit requested a startup mode outside the valid set.
    #[error("invalid startup mode {mode:?} for unit {unit}")]
    InvalidMode {
        /// Unit the mode was requested for.
        unit: String,
        /// The rejected mode string.
        mode: String,
    },

    /// A unit manifest is missing or malformed.
    #[error("cannot load manifest for unit {unit}: {message}")]
    ManifestLoad {
        /// Unit whose manifest failed to load.
        unit: String,
        /// Description of the failure.
        message: String,
    },

    /// Rebuilding or recompressing a parsed module container failed.
    ///
    /// Parse failures are not errors (the stripper signals `Unchanged`);
    /// a failure after a successful parse indicates a bug.
    #[error("container rebuild failed: {message}")]
    ChunkRebuild {
        /// Description of the internal fault.
        message: String,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, ReleaseError>;
