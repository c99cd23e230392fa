//! Best-effort stripping of non-essential chunks from module containers.
//!
//! Only the chunks a runtime needs to load and run a module survive; build
//! metadata (compile info, debug info, documentation) is dropped and the
//! result is recompressed. Stripping is an optimization, never a
//! correctness requirement: anything unparseable is left untouched.

use std::io::Write;

use relforge_common::error::{ReleaseError, Result};

use crate::container::{Chunk, ChunkTag, ModuleContainer, build, parse};

/// Extended atom table tag; the preferred atom-slot encoding.
pub const ATOM_TABLE_EXT: ChunkTag = *b"AtU8";

/// Legacy atom table tag, accepted only when [`ATOM_TABLE_EXT`] is absent.
pub const ATOM_TABLE_LEGACY: ChunkTag = *b"Atom";

/// The nine retained chunk slots. The atom slot is [`ATOM_TABLE_EXT`], with
/// [`ATOM_TABLE_LEGACY`] as fallback; the two encodings never coexist in a
/// well-formed container.
pub const RETAINED_TAGS: [ChunkTag; 9] = [
    ATOM_TABLE_EXT,
    *b"Attr",
    *b"Code",
    *b"StrT",
    *b"ImpT",
    *b"ExpT",
    *b"FunT",
    *b"LitT",
    *b"Line",
];

/// Result of a strip attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StripOutcome {
    /// A reduced, recompressed container. Replace the original with it.
    Stripped(Vec<u8>),
    /// The input was not a parseable container. Copy the original verbatim.
    Unchanged,
}

fn is_retained(container: &ModuleContainer, chunk: &Chunk) -> bool {
    if RETAINED_TAGS.contains(&chunk.tag) {
        return true;
    }
    chunk.tag == ATOM_TABLE_LEGACY && !container.has_chunk(ATOM_TABLE_EXT)
}

/// Strips non-essential chunks from one compiled module file.
///
/// Retained chunks keep their original relative order; tags on the retained
/// list but absent from the input are simply missing, not an error. The
/// rebuilt container is gzip-compressed.
///
/// # Errors
///
/// Returns `ReleaseError::ChunkRebuild` only if compression fails after a
/// successful parse — an internal fault. Unparseable input is not an error;
/// it yields [`StripOutcome::Unchanged`].
pub fn strip(bytes: &[u8]) -> Result<StripOutcome> {
    let container = match parse(bytes) {
        Ok(container) => container,
        Err(err) => {
            tracing::debug!(error = %err, "container not strippable, leaving unchanged");
            return Ok(StripOutcome::Unchanged);
        }
    };

    let total = container.chunks.len();
    let retained: Vec<Chunk> = container
        .chunks
        .iter()
        .filter(|c| is_retained(&container, c))
        .cloned()
        .collect();
    tracing::debug!(total, retained = retained.len(), "stripping container");

    let rebuilt = build(&ModuleContainer { chunks: retained });
    Ok(StripOutcome::Stripped(compress(&rebuilt)?))
}

fn compress(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut encoder =
        flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder
        .write_all(bytes)
        .map_err(|e| ReleaseError::ChunkRebuild {
            message: format!("gzip compression failed: {e}"),
        })?;
    encoder.finish().map_err(|e| ReleaseError::ChunkRebuild {
        message: format!("gzip compression failed: {e}"),
    })
}
