//! Error types for the I/O side of primedex

use std::path::PathBuf;

use primedex_core::format::constants::FORMAT_VERSION;
use primedex_core::PrimedexError;
use thiserror::Error;

/// Errors raised while building, saving or loading artifact sets
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem failure; always fatal for the run
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Blob is structurally broken (bad magic, wrong lengths, inconsistent list)
    #[error("invalid artifact {}: {source}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: PrimedexError,
    },

    /// Manifest exists but is not valid JSON for this schema
    #[error("invalid manifest {}: {source}", path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Artifact was written under another cache key
    #[error(
        "stale artifact {}: built for bound {found_bound} with format v{found_version}, \
         wanted bound {expected_bound} with format v{}",
        path.display(),
        FORMAT_VERSION
    )]
    Stale {
        path: PathBuf,
        expected_bound: u64,
        found_bound: u64,
        found_version: u8,
    },

    /// Sieving could not start (bound out of range)
    #[error("cannot sieve: {0}")]
    Sieve(#[from] PrimedexError),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn format(path: impl Into<PathBuf>, source: PrimedexError) -> Self {
        Self::Format {
            path: path.into(),
            source,
        }
    }

    /// Whether this error means "recompute" rather than "abort"
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::Stale { .. })
    }
}

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Errors that end an interactive query session
#[derive(Debug, Error)]
pub enum QueryError {
    /// The response channel rejected a write
    #[error("failed to write to console: {0}")]
    Write(#[source] std::io::Error),
}
