//! Typed representation of the chunked module container format.
//!
//! A container is a header followed by an ordered sequence of tagged
//! chunks. Parsing and rebuilding are pure functions between bytes and
//! [`ModuleContainer`], so format quirks stay behind this module.
//!
//! Wire layout (all integers big-endian):
//!
//! ```text
//! "FOR1" | u32 size-after-this-field | "MODL"
//! then per chunk: 4-byte tag | u32 payload length | payload | pad to 4
//! ```
//!
//! The whole file may additionally be gzip-compressed.

use std::io::Read;

use thiserror::Error;

/// Container magic at offset 0.
pub const FORM_MAGIC: [u8; 4] = *b"FOR1";

/// Form type identifying a compiled module container.
pub const FORM_TYPE: [u8; 4] = *b"MODL";

/// A chunk-tag identifier, four ASCII bytes.
pub type ChunkTag = [u8; 4];

/// Why a byte sequence could not be parsed as a module container.
///
/// Parse failures are non-fatal for callers of the stripper; they degrade
/// to copying the original file verbatim.
#[derive(Debug, Error)]
pub enum ContainerParseError {
    /// The input is shorter than the fixed header.
    #[error("input too short for container header ({len} bytes)")]
    TooShort {
        /// Actual input length.
        len: usize,
    },
    /// The form magic or form type does not match.
    #[error("bad container magic")]
    BadMagic,
    /// The header's size field points past the end of the input.
    #[error("declared size {declared} exceeds available {available} bytes")]
    Truncated {
        /// Size declared in the header.
        declared: usize,
        /// Bytes actually available after the size field.
        available: usize,
    },
    /// A chunk header or payload runs past the declared form size.
    #[error("chunk table corrupt at offset {offset}")]
    CorruptChunk {
        /// Offset of the offending chunk within the form.
        offset: usize,
    },
    /// The gzip envelope could not be decompressed.
    #[error("bad gzip envelope: {0}")]
    BadEnvelope(std::io::Error),
}

/// One tagged chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Four-byte chunk tag.
    pub tag: ChunkTag,
    /// Raw chunk payload, without padding.
    pub payload: Vec<u8>,
}

/// A parsed module container: its chunks in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleContainer {
    /// Chunks in their original file order.
    pub chunks: Vec<Chunk>,
}

impl ModuleContainer {
    /// Returns whether the container holds a chunk with the given tag.
    #[must_use]
    pub fn has_chunk(&self, tag: ChunkTag) -> bool {
        self.chunks.iter().any(|c| c.tag == tag)
    }
}

/// Rounds a chunk payload length up to the 4-byte chunk boundary.
const fn padded(len: usize) -> usize {
    (len + 3) & !3
}

/// Reads a big-endian u32 at `offset`. Caller guarantees bounds.
fn read_u32(bytes: &[u8], offset: usize) -> usize {
    u32::from_be_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ]) as usize
}

/// Parses a module container, transparently decompressing a gzip envelope.
///
/// Trailing bytes after the declared form size are tolerated; truncation
/// inside it is not.
///
/// # Errors
///
/// Returns a [`ContainerParseError`] describing the first malformation
/// encountered.
pub fn parse(bytes: &[u8]) -> Result<ModuleContainer, ContainerParseError> {
    if bytes.starts_with(&[0x1f, 0x8b]) {
        let mut decoder = flate2::read::GzDecoder::new(bytes);
        let mut inflated = Vec::new();
        let _ = decoder
            .read_to_end(&mut inflated)
            .map_err(ContainerParseError::BadEnvelope)?;
        return parse_form(&inflated);
    }
    parse_form(bytes)
}

fn parse_form(bytes: &[u8]) -> Result<ModuleContainer, ContainerParseError> {
    if bytes.len() < 12 {
        return Err(ContainerParseError::TooShort { len: bytes.len() });
    }
    if bytes[0..4] != FORM_MAGIC {
        return Err(ContainerParseError::BadMagic);
    }
    let declared = read_u32(bytes, 4);
    let available = bytes.len() - 8;
    if declared > available {
        return Err(ContainerParseError::Truncated {
            declared,
            available,
        });
    }
    if declared < 4 || bytes[8..12] != FORM_TYPE {
        return Err(ContainerParseError::BadMagic);
    }

    let end = 8 + declared;
    let mut offset = 12;
    let mut chunks = Vec::new();
    while offset < end {
        if offset + 8 > end {
            return Err(ContainerParseError::CorruptChunk { offset });
        }
        let mut tag = [0u8; 4];
        tag.copy_from_slice(&bytes[offset..offset + 4]);
        let len = read_u32(bytes, offset + 4);
        let start = offset + 8;
        if start + len > end {
            return Err(ContainerParseError::CorruptChunk { offset });
        }
        chunks.push(Chunk {
            tag,
            payload: bytes[start..start + len].to_vec(),
        });
        // Padding may be absent on the final chunk.
        offset = (start + padded(len)).min(end);
    }

    Ok(ModuleContainer { chunks })
}

/// Rebuilds the byte form of a container, recomputing the header size field.
///
/// Chunks are emitted in their stored order with payloads padded to the
/// 4-byte chunk boundary.
#[must_use]
pub fn build(container: &ModuleContainer) -> Vec<u8> {
    let body_len: usize = container
        .chunks
        .iter()
        .map(|c| 8 + padded(c.payload.len()))
        .sum();
    let declared = 4 + body_len;

    let mut out = Vec::with_capacity(8 + declared);
    out.extend_from_slice(&FORM_MAGIC);
    #[allow(clippy::cast_possible_truncation)]
    out.extend_from_slice(&(declared as u32).to_be_bytes());
    out.extend_from_slice(&FORM_TYPE);
    for chunk in &container.chunks {
        out.extend_from_slice(&chunk.tag);
        #[allow(clippy::cast_possible_truncation)]
        out.extend_from_slice(&(chunk.payload.len() as u32).to_be_bytes());
        out.extend_from_slice(&chunk.payload);
        out.resize(out.len() + padded(chunk.payload.len()) - chunk.payload.len(), 0);
    }
    out
}
