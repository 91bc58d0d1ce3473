//! Persistence interface for artifact sets

use crate::artifact::ArtifactSet;

/// Key-value persistence for artifact sets, keyed by bound
///
/// Implementations decide how artifacts are laid out (files, memory, ...).
/// The bound is the whole key at this level; implementations may record
/// further key material such as a format version and must refuse to hand
/// back artifacts whose recorded key differs from the requested one.
pub trait ArtifactStore {
    /// Error type for load and save operations
    type Error;

    /// Whether a complete artifact set for `bound` is present
    fn exists(&self, bound: u64) -> bool;

    /// Load the artifact set for `bound`
    ///
    /// Only meaningful when [`ArtifactStore::exists`] returned true.
    fn load(&self, bound: u64) -> Result<ArtifactSet, Self::Error>;

    /// Persist `set` under its own bound, replacing anything stored there
    fn save(&self, set: &ArtifactSet) -> Result<(), Self::Error>;
}
