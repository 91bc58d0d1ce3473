#![no_std]

//! primedex core - sieve, packed bitmap and artifact format definitions
//!
//! This crate holds everything about the prime engine that does not touch
//! the outside world: the packed primality bitmap, the segmented sieve that
//! fills it, the derived prime list and rank index, the binary layout of
//! persisted artifacts, and input validation. I/O lives in `primedex`.

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod error;
pub mod format;
pub mod traits;
pub mod validation;

#[cfg(feature = "alloc")]
pub mod artifact;
#[cfg(feature = "alloc")]
pub mod bitmap;
#[cfg(feature = "alloc")]
pub mod sieve;
#[cfg(feature = "alloc")]
pub mod store;

pub use error::*;
pub use format::*;
pub use traits::*;
pub use validation::{is_sentinel, parse_query, SENTINEL};

#[cfg(feature = "alloc")]
pub use artifact::ArtifactSet;
#[cfg(feature = "alloc")]
pub use bitmap::PrimeBitmap;
#[cfg(feature = "alloc")]
pub use sieve::{isqrt, sieve, SieveBuilder};
#[cfg(feature = "alloc")]
pub use store::{PrimeStore, RankIndex};
