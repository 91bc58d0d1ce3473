//! JSON manifest describing a persisted artifact set
//!
//! The manifest is written after all three blobs, so its presence marks a
//! complete set. It also carries the cache key (bound + format version).

use primedex_core::format::constants::FORMAT_VERSION;
use primedex_core::ArtifactSet;
use serde::{Deserialize, Serialize};

/// Summary of one artifact set as stored next to its blobs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactManifest {
    /// Inclusive sieve bound
    pub bound: u64,
    /// Format version that wrote the blobs
    pub format_version: u8,
    /// Bits in the primality bitmap (`bound + 1`)
    pub bitmap_bits: u64,
    /// Entries in the prime list (2 excluded)
    pub prime_count: u64,
    /// Largest prime in the list
    pub max_prime: Option<u64>,
}

impl ArtifactManifest {
    /// Describe `set` under the current format version
    pub fn for_set(set: &ArtifactSet) -> Self {
        Self {
            bound: set.bound(),
            format_version: FORMAT_VERSION,
            bitmap_bits: set.bitmap().len(),
            prime_count: set.store().len() as u64,
            max_prime: set.store().max_prime(),
        }
    }

    /// Whether this manifest was written for `bound` by the current format
    pub fn is_current_for(&self, bound: u64) -> bool {
        self.bound == bound && self.format_version == FORMAT_VERSION
    }

    /// Whether `set` agrees with the counts recorded here
    pub fn describes(&self, set: &ArtifactSet) -> bool {
        *self == Self::for_set(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_for_bound_twenty() {
        let set = ArtifactSet::build(20).unwrap();
        let manifest = ArtifactManifest::for_set(&set);
        assert_eq!(manifest.bound, 20);
        assert_eq!(manifest.bitmap_bits, 21);
        assert_eq!(manifest.prime_count, 7);
        assert_eq!(manifest.max_prime, Some(19));
        assert!(manifest.is_current_for(20));
        assert!(!manifest.is_current_for(21));
        assert!(manifest.describes(&set));
    }

    #[test]
    fn test_manifest_json_shape() {
        let manifest = ArtifactManifest::for_set(&ArtifactSet::build(2).unwrap());
        let json = serde_json::to_value(&manifest).unwrap();
        assert_eq!(json["bound"], 2);
        assert_eq!(json["prime_count"], 0);
        assert!(json["max_prime"].is_null());

        let back: ArtifactManifest = serde_json::from_value(json).unwrap();
        assert_eq!(back, manifest);
    }
}
