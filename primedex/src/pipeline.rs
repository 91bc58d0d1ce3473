//! Build-or-load pipeline tying the sieve to the artifact store

use std::time::Instant;

use primedex_core::{ArtifactSet, ArtifactStore, SieveBuilder};
use tracing::{info, warn};

use crate::config::PrimedexConfig;
use crate::disk_store::DiskStore;
use crate::error::StoreError;

/// Where a prepared artifact set came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// Nothing was cached; the set was sieved and saved
    Built,
    /// The cached set matched the requested key
    Loaded,
    /// The cached set was stale and has been replaced
    Rebuilt,
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Provenance::Built => "built",
            Provenance::Loaded => "loaded",
            Provenance::Rebuilt => "rebuilt",
        };
        f.write_str(label)
    }
}

/// Produces artifact sets, reusing persisted ones when they are current
pub struct PrimeEngine<S> {
    store: S,
    sieve: SieveBuilder,
    progress_interval: u64,
}

impl PrimeEngine<DiskStore> {
    /// Engine over the configured data directory
    pub fn from_config(config: &PrimedexConfig) -> Self {
        Self::new(DiskStore::new(config.data_dir.clone()))
            .with_sieve(SieveBuilder::new().with_segment_bytes(config.segment_bytes))
            .with_progress_interval(config.progress_interval)
    }
}

impl<S> PrimeEngine<S>
where
    S: ArtifactStore<Error = StoreError>,
{
    /// Engine with the default sieve and progress interval
    pub fn new(store: S) -> Self {
        Self {
            store,
            sieve: SieveBuilder::new(),
            progress_interval: primedex_core::format::constants::DEFAULT_PROGRESS_INTERVAL,
        }
    }

    /// Replace the sieve builder
    pub fn with_sieve(mut self, sieve: SieveBuilder) -> Self {
        self.sieve = sieve;
        self
    }

    /// Log every `interval`-th prime while deriving (0 disables)
    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    /// The backing store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load the set for `bound` if a current one is persisted, otherwise build
    /// and persist it
    ///
    /// Stale artifacts are rebuilt; every other store error aborts.
    pub fn prepare(&self, bound: u64) -> Result<(ArtifactSet, Provenance), StoreError> {
        if self.store.exists(bound) {
            match self.store.load(bound) {
                Ok(set) => {
                    info!(bound, primes = set.store().len(), "loaded cached primes");
                    return Ok((set, Provenance::Loaded));
                }
                Err(e) if e.is_stale() => {
                    warn!(bound, error = %e, "cached primes are stale, recomputing");
                    let set = self.build_and_save(bound)?;
                    return Ok((set, Provenance::Rebuilt));
                }
                Err(e) => return Err(e),
            }
        }

        info!(bound, "no cached primes, computing");
        let set = self.build_and_save(bound)?;
        Ok((set, Provenance::Built))
    }

    fn build_and_save(&self, bound: u64) -> Result<ArtifactSet, StoreError> {
        let started = Instant::now();
        let set = ArtifactSet::build_with(
            &self.sieve,
            bound,
            self.progress_interval,
            |count, prime| info!(count, prime, "primes found"),
        )?;
        info!(
            bound,
            primes = set.store().len(),
            max_prime = ?set.store().max_prime(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "sieve complete"
        );

        let started = Instant::now();
        self.store.save(&set)?;
        info!(
            bound,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "saved primes"
        );
        Ok(set)
    }
}
