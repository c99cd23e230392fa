//! # relforge-assemble
//!
//! The assembly pipeline around the resolver and codec cores: loads unit
//! manifests from disk, lays out the versioned release directory, copies
//! unit artifacts (stripping module files when enabled), emits the release
//! manifest and launcher script, and optionally packs the result into a
//! `.tar.gz` archive.

pub mod archive;
pub mod launcher;
pub mod layout;
pub mod pipeline;
pub mod release;
pub mod source;

pub use layout::ReleaseLayout;
pub use pipeline::{AssembleReport, assemble};
pub use source::DirManifestSource;
