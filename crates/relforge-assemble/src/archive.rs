//! Release archive packing.
//!
//! Packs an assembled release directory into a gzip-compressed tarball next
//! to it, named `<name>-<version>.tar.gz`.

use std::path::{Path, PathBuf};

use relforge_common::error::{ReleaseError, Result};

/// Packs `release_root` into a `.tar.gz` in its parent directory.
///
/// Entries are rooted at the release directory name so the archive unpacks
/// to `<name>-<version>/...`.
///
/// # Errors
///
/// Returns an error if the archive cannot be created or written.
pub fn pack(release_root: &Path) -> Result<PathBuf> {
    let dir_name = release_root
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ReleaseError::Config {
            message: format!("release root has no directory name: {}", release_root.display()),
        })?;
    // Not `with_extension`: a versioned name like `app-1.0.0` would lose
    // its last component to the extension swap.
    let archive_path = release_root
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(format!("{dir_name}.tar.gz"));
    tracing::info!(archive = %archive_path.display(), "packing release archive");

    let file = std::fs::File::create(&archive_path).map_err(|e| ReleaseError::Io {
        path: archive_path.clone(),
        source: e,
    })?;
    let encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
    let mut builder = tar::Builder::new(encoder);
    builder
        .append_dir_all(dir_name, release_root)
        .map_err(|e| ReleaseError::Io {
            path: release_root.to_path_buf(),
            source: e,
        })?;
    let encoder = builder.into_inner().map_err(|e| ReleaseError::Io {
        path: archive_path.clone(),
        source: e,
    })?;
    let _ = encoder.finish().map_err(|e| ReleaseError::Io {
        path: archive_path.clone(),
        source: e,
    })?;

    Ok(archive_path)
}
