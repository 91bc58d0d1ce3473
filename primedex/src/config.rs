//! Runtime configuration for the prime engine

use std::path::{Path, PathBuf};

use primedex_core::format::constants::{
    DEFAULT_PROGRESS_INTERVAL, MAX_BOUND, MAX_SEGMENT_BYTES, SEGMENT_BYTES,
};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default working subdirectory for persisted artifacts
pub const DEFAULT_DATA_DIR: &str = "primes";

/// Default sieve bound
pub const DEFAULT_BOUND: u64 = 1_000_000;

/// Configuration for building, caching and querying primes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimedexConfig {
    /// Inclusive sieve bound
    pub bound: u64,
    /// Directory holding persisted artifacts, relative to the working directory
    pub data_dir: PathBuf,
    /// Log a progress line every this many primes (0 disables)
    pub progress_interval: u64,
    /// Sieve segment size in bytes
    pub segment_bytes: usize,
}

impl Default for PrimedexConfig {
    fn default() -> Self {
        Self {
            bound: DEFAULT_BOUND,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            segment_bytes: SEGMENT_BYTES,
        }
    }
}

impl PrimedexConfig {
    /// Load configuration from a JSON file; missing fields take defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Set the sieve bound
    pub fn with_bound(mut self, bound: u64) -> Self {
        self.bound = bound;
        self
    }

    /// Set the artifact directory
    pub fn with_data_dir<P: Into<PathBuf>>(mut self, data_dir: P) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Set the progress interval
    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Set the sieve segment size
    pub fn with_segment_bytes(mut self, bytes: usize) -> Self {
        self.segment_bytes = bytes;
        self
    }

    /// Check the configuration before any work starts
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bound > MAX_BOUND {
            return Err(ConfigError::Invalid(format!(
                "bound {} exceeds the maximum of {MAX_BOUND}",
                self.bound
            )));
        }
        if self.segment_bytes == 0 {
            return Err(ConfigError::Invalid(
                "segment_bytes must be greater than zero".to_string(),
            ));
        }
        if self.segment_bytes > MAX_SEGMENT_BYTES {
            return Err(ConfigError::Invalid(format!(
                "segment_bytes {} exceeds the maximum of {MAX_SEGMENT_BYTES}",
                self.segment_bytes
            )));
        }
        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("data_dir must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = PrimedexConfig::default();
        assert_eq!(config.bound, 1_000_000);
        assert_eq!(config.data_dir, PathBuf::from("primes"));
        assert_eq!(config.progress_interval, 1_000_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = PrimedexConfig::default()
            .with_bound(20)
            .with_data_dir("/tmp/elsewhere")
            .with_progress_interval(0)
            .with_segment_bytes(64);
        assert_eq!(config.bound, 20);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/elsewhere"));
        assert_eq!(config.progress_interval, 0);
        assert_eq!(config.segment_bytes, 64);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(PrimedexConfig::default().with_bound(u64::MAX).validate().is_err());
        assert!(PrimedexConfig::default().with_segment_bytes(0).validate().is_err());
        assert!(PrimedexConfig::default()
            .with_segment_bytes(usize::MAX)
            .validate()
            .is_err());
        assert!(PrimedexConfig::default()
            .with_segment_bytes(MAX_SEGMENT_BYTES)
            .validate()
            .is_ok());
        assert!(PrimedexConfig::default().with_data_dir("").validate().is_err());
    }

    #[test]
    fn test_json_partial_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "bound": 500, "data_dir": "cache" }}"#).unwrap();

        let config = PrimedexConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.bound, 500);
        assert_eq!(config.data_dir, PathBuf::from("cache"));
        assert_eq!(config.progress_interval, DEFAULT_PROGRESS_INTERVAL);
    }

    #[test]
    fn test_json_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            PrimedexConfig::from_json_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
        assert!(matches!(
            PrimedexConfig::from_json_file("/definitely/not/here.json"),
            Err(ConfigError::Io { .. })
        ));
    }
}
