//! The persisted artifact triple: bitmap, prime list and rank index

use crate::bitmap::PrimeBitmap;
use crate::format::constants::DEFAULT_PROGRESS_INTERVAL;
use crate::sieve::SieveBuilder;
use crate::store::PrimeStore;
use crate::{PrimedexError, Result};

/// Everything computed for one bound
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSet {
    bitmap: PrimeBitmap,
    store: PrimeStore,
}

impl ArtifactSet {
    /// Sieve and derive the full set for `bound`
    pub fn build(bound: u64) -> Result<Self> {
        Self::build_with(&SieveBuilder::new(), bound, DEFAULT_PROGRESS_INTERVAL, |_, _| {})
    }

    /// Sieve with `sieve` and derive with a progress callback
    pub fn build_with<F>(
        sieve: &SieveBuilder,
        bound: u64,
        progress_interval: u64,
        progress: F,
    ) -> Result<Self>
    where
        F: FnMut(u64, u64),
    {
        let bitmap = sieve.build(bound)?;
        let store = PrimeStore::derive_with_progress(&bitmap, bound, progress_interval, progress);
        Ok(Self { bitmap, store })
    }

    /// Pair an existing bitmap and store, checking they describe the same bound
    pub fn from_parts(bitmap: PrimeBitmap, store: PrimeStore) -> Result<Self> {
        if bitmap.len() != store.bound().saturating_add(1) {
            return Err(PrimedexError::BoundMismatch);
        }
        Ok(Self { bitmap, store })
    }

    /// Inclusive bound
    pub fn bound(&self) -> u64 {
        self.store.bound()
    }

    /// The primality bitmap
    pub fn bitmap(&self) -> &PrimeBitmap {
        &self.bitmap
    }

    /// The prime list and rank index
    pub fn store(&self) -> &PrimeStore {
        &self.store
    }

    /// Split into bitmap and store
    pub fn into_parts(self) -> (PrimeBitmap, PrimeStore) {
        (self.bitmap, self.store)
    }
}
