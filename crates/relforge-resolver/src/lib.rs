//! # relforge-resolver
//!
//! Computes the dependency closure of a set of root units and the order in
//! which the resolved units should be started.
//!
//! Manifest loading is injected through the [`manifest::ManifestSource`]
//! trait, so resolution is a pure computation over in-memory data and can be
//! tested with an in-memory fake.

pub mod closure;
pub mod manifest;
pub mod order;

pub use closure::resolve;
pub use manifest::{ManifestSource, UnitManifest};
pub use order::start_order;
