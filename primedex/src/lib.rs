//! primedex - cached prime sieve with an interactive query console
//!
//! Computes every prime up to a bound with a segmented, bit-packed Sieve of
//! Eratosthenes, persists the result to a data directory, and answers
//! "which prime is at position n" and "is n prime" queries over a line-based
//! console.
//!
//! ## Architecture
//!
//! primedex follows a format/implementation split:
//!
//! - **primedex-core**: sieve, bitmap, prime list and blob format (no I/O, `no_std`)
//! - **primedex**: on-disk store, build-or-load pipeline, query console, CLI
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use primedex::{IoChannel, PrimeEngine, PrimedexConfig, QueryService};
//!
//! fn example() -> anyhow::Result<()> {
//!     let config = PrimedexConfig::default().with_bound(20);
//!     let engine = PrimeEngine::from_config(&config);
//!
//!     // Sieved on the first run, loaded from `primes/` afterwards
//!     let (set, provenance) = engine.prepare(config.bound)?;
//!     println!("{} primes ({provenance})", set.store().len());
//!
//!     QueryService::new(set.store(), IoChannel::stdio()).run()?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **mmap** (default): memory-mapped loading of persisted blobs
//! - **serde** (default): serde derives on core format types

pub use primedex_core::{
    // Computation
    sieve, ArtifactSet, PrimeBitmap, PrimeStore, RankIndex, SieveBuilder,
    // Format definitions
    ArtifactHeader, ArtifactKind,
    // Persistence seam
    ArtifactStore,
    // Error handling
    PrimedexError, Result,
};

pub mod channel;
pub mod config;
pub mod disk_store;
pub mod error;
pub mod manifest;
pub mod pipeline;
pub mod query;

pub use channel::{IoChannel, LineChannel};
pub use config::PrimedexConfig;
pub use disk_store::DiskStore;
pub use error::{ConfigError, QueryError, StoreError};
pub use manifest::ArtifactManifest;
pub use pipeline::{PrimeEngine, Provenance};
pub use query::{
    answer_index, answer_primality, IndexAnswer, PrimalityAnswer, QueryService, QueryState,
    QuerySummary, QUERY_PROMPTS,
};
