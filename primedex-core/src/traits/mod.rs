//! Abstract interfaces for the prime engine
//!
//! Traits are pure interfaces - no concrete implementations.

#[cfg(feature = "alloc")]
pub mod persistence;

#[cfg(feature = "alloc")]
pub use persistence::ArtifactStore;
