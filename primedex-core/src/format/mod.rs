//! Binary format definitions for persisted prime artifacts
//!
//! This module contains pure data structure definitions for the artifact
//! wire format. No I/O operations, only layout and encoding rules.

pub mod constants;
pub mod header;
#[cfg(feature = "alloc")]
pub mod codec;

pub use header::{ArtifactHeader, ArtifactKind};
#[cfg(feature = "alloc")]
pub use codec::{decode_pairs, decode_words, encode_pairs, encode_words};
