//! # relforge-codec
//!
//! Codec for the chunked binary container format holding one compiled
//! module: parsing into a typed value, rebuilding with recomputed header
//! fields, and stripping non-essential metadata chunks with whole-file
//! recompression.
//!
//! The stripper operates purely on byte sequences; file reads and writes
//! belong to the assembly pipeline.

pub mod container;
pub mod strip;

pub use container::{Chunk, ChunkTag, ContainerParseError, ModuleContainer};
pub use strip::{RETAINED_TAGS, StripOutcome, strip};
