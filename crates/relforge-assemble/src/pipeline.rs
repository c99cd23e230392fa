//! The assembly pipeline.
//!
//! Composes the resolver and the codec: resolves the unit closure, copies
//! each unit's artifacts into the versioned layout (stripping module files
//! when enabled, with verbatim fallback), then emits the release manifest,
//! the launcher script, and optionally the release archive.

use std::path::{Path, PathBuf};

use relforge_codec::strip::StripOutcome;
use relforge_common::config::ReleaseConfig;
use relforge_common::constants::{MODULE_EXTENSION, MODULES_DIR, SUPPORT_DIR};
use relforge_common::error::{ReleaseError, Result};
use relforge_common::types::Unit;
use relforge_resolver::{resolve, start_order};

use crate::layout::ReleaseLayout;
use crate::release::{PackagedModule, PackagedUnit, ReleaseManifest, hash_file};
use crate::source::DirManifestSource;
use crate::{archive, launcher};

/// Summary of one assembly run.
#[derive(Debug)]
pub struct AssembleReport {
    /// Root directory of the assembled release.
    pub release_root: PathBuf,
    /// Number of packaged units.
    pub units: usize,
    /// Number of packaged module files.
    pub modules: usize,
    /// Total module bytes read from the unit sources.
    pub bytes_in: u64,
    /// Total module bytes written into the release.
    pub bytes_out: u64,
    /// Path of the release archive, when one was requested.
    pub archive: Option<PathBuf>,
}

/// Runs the full assembly pipeline for `config`.
///
/// # Errors
///
/// Returns the resolver's fatal errors (`InvalidMode`, `ManifestLoad`), a
/// `Config` error for a cyclic start order, `ChunkRebuild` for internal
/// stripper faults, and `Io` for filesystem failures.
pub fn assemble(config: &ReleaseConfig) -> Result<AssembleReport> {
    tracing::info!(
        release = %config.name,
        version = %config.version,
        strip = config.strip,
        "assembling release"
    );

    let source = DirManifestSource::new(&config.units_dir);
    let resolved = resolve(&source, &config.root_names(), &config.mode_overrides())?;
    let order = start_order(&resolved)?;
    let layout = ReleaseLayout::create(&config.output_dir, &config.name, &config.version)?;

    let mut packaged = Vec::with_capacity(resolved.len());
    let mut modules = 0;
    let mut bytes_in = 0;
    let mut bytes_out = 0;
    for unit in resolved.values() {
        let result = package_unit(unit, &source, &layout, config.strip)?;
        modules += result.unit.modules.len();
        bytes_in += result.bytes_in;
        bytes_out += result.bytes_out;
        packaged.push(result.unit);
    }

    let manifest = ReleaseManifest {
        name: config.name.clone(),
        version: config.version.clone(),
        created_at: chrono::Utc::now(),
        start_order: order.clone(),
        units: packaged,
    };
    manifest.write(&layout.release_manifest_path())?;
    let _ = launcher::write(&layout.bin_dir(), &config.name, &config.version, &order)?;

    let archive = if config.archive {
        Some(archive::pack(layout.root())?)
    } else {
        Option::None
    };

    tracing::info!(
        units = resolved.len(),
        modules,
        bytes_in,
        bytes_out,
        "release assembled"
    );
    Ok(AssembleReport {
        release_root: layout.root().to_path_buf(),
        units: resolved.len(),
        modules,
        bytes_in,
        bytes_out,
        archive,
    })
}

struct PackagedUnitResult {
    unit: PackagedUnit,
    bytes_in: u64,
    bytes_out: u64,
}

/// Copies one unit's artifacts into the layout.
fn package_unit(
    unit: &Unit,
    source: &DirManifestSource,
    layout: &ReleaseLayout,
    strip: bool,
) -> Result<PackagedUnitResult> {
    let src = source.unit_dir(&unit.name);
    let dest = layout.unit_dir(&unit.name, &unit.version);
    tracing::debug!(unit = %unit.name, dest = %dest.display(), "packaging unit");

    let mut packaged_modules = Vec::new();
    let mut bytes_in = 0;
    let mut bytes_out = 0;

    let modules_src = src.join(MODULES_DIR);
    if modules_src.is_dir() {
        let modules_dest = dest.join(MODULES_DIR);
        std::fs::create_dir_all(&modules_dest).map_err(|e| ReleaseError::Io {
            path: modules_dest.clone(),
            source: e,
        })?;
        for file in sorted_files(&modules_src)? {
            let out_path = modules_dest.join(&file);
            let in_path = modules_src.join(&file);
            let (read, written) = place_module(&in_path, &out_path, strip)?;
            bytes_in += read;
            bytes_out += written;
            packaged_modules.push(PackagedModule {
                file,
                digest: hash_file(&out_path)?,
                size_bytes: written,
            });
        }
    }

    let support_src = src.join(SUPPORT_DIR);
    if support_src.is_dir() {
        copy_dir_recursive(&support_src, &dest.join(SUPPORT_DIR))?;
    }

    Ok(PackagedUnitResult {
        unit: PackagedUnit {
            name: unit.name.clone(),
            version: unit.version.clone(),
            mode: unit.mode,
            included_units: unit.included_units.clone(),
            modules: packaged_modules,
        },
        bytes_in,
        bytes_out,
    })
}

/// Copies or strips one module file. Returns `(bytes read, bytes written)`.
///
/// Only files carrying the module extension are strip candidates; a strip
/// that comes back [`StripOutcome::Unchanged`] falls back to a verbatim
/// copy.
fn place_module(in_path: &Path, out_path: &Path, strip: bool) -> Result<(u64, u64)> {
    let bytes = std::fs::read(in_path).map_err(|e| ReleaseError::Io {
        path: in_path.to_path_buf(),
        source: e,
    })?;
    let read = bytes.len() as u64;

    let is_module = in_path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(MODULE_EXTENSION));
    let output = if strip && is_module {
        match relforge_codec::strip(&bytes)? {
            StripOutcome::Stripped(stripped) => {
                tracing::debug!(
                    file = %in_path.display(),
                    before = read,
                    after = stripped.len(),
                    "stripped module"
                );
                stripped
            }
            StripOutcome::Unchanged => {
                tracing::warn!(file = %in_path.display(), "unparseable module, copied verbatim");
                bytes
            }
        }
    } else {
        bytes
    };

    let written = output.len() as u64;
    std::fs::write(out_path, output).map_err(|e| ReleaseError::Io {
        path: out_path.to_path_buf(),
        source: e,
    })?;
    Ok((read, written))
}

/// Returns the plain-file names in `dir`, name-sorted for determinism.
fn sorted_files(dir: &Path) -> Result<Vec<String>> {
    let entries = std::fs::read_dir(dir).map_err(|e| ReleaseError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ReleaseError::Io {
            path: dir.to_path_buf(),
            source: e,
        })?;
        if entry.path().is_file() {
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_owned());
            }
        }
    }
    names.sort();
    Ok(names)
}

/// Recursively copies a support directory verbatim.
fn copy_dir_recursive(src: &Path, dest: &Path) -> Result<()> {
    std::fs::create_dir_all(dest).map_err(|e| ReleaseError::Io {
        path: dest.to_path_buf(),
        source: e,
    })?;
    let entries = std::fs::read_dir(src).map_err(|e| ReleaseError::Io {
        path: src.to_path_buf(),
        source: e,
    })?;
    for entry in entries {
        let entry = entry.map_err(|e| ReleaseError::Io {
            path: src.to_path_buf(),
            source: e,
        })?;
        let from = entry.path();
        let to = dest.join(entry.file_name());
        if from.is_dir() {
            copy_dir_recursive(&from, &to)?;
        } else {
            let _ = std::fs::copy(&from, &to).map_err(|e| ReleaseError::Io {
                path: from.clone(),
                source: e,
            })?;
        }
    }
    Ok(())
}
