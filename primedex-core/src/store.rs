//! Ordered prime list and value→rank index derived from a primality bitmap
//!
//! The list holds the primes in `[3, bound]` only. 2 is deliberately left
//! out, so ranks count "primes greater than 2": rank 0 is 3, rank 1 is 5, and
//! so on. The progress count still credits 2.

use alloc::vec::Vec;
use hashbrown::HashMap;

use crate::bitmap::PrimeBitmap;
use crate::format::constants::DEFAULT_PROGRESS_INTERVAL;
use crate::{PrimedexError, Result};

/// Mapping from prime value to its 0-based position in the list
pub type RankIndex = HashMap<u64, u64>;

/// Ascending odd primes with their rank index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimeStore {
    bound: u64,
    primes: Vec<u64>,
    ranks: RankIndex,
}

impl PrimeStore {
    /// Derive the list and index from `bitmap`, scanning odd values in `[3, bound]`
    pub fn derive(bitmap: &PrimeBitmap, bound: u64) -> Self {
        Self::derive_with_progress(bitmap, bound, DEFAULT_PROGRESS_INTERVAL, |_, _| {})
    }

    /// Like [`PrimeStore::derive`], calling `progress(count, prime)` every
    /// `interval`-th prime
    ///
    /// `count` includes 2. An interval of 0 disables the callback.
    pub fn derive_with_progress<F>(
        bitmap: &PrimeBitmap,
        bound: u64,
        interval: u64,
        mut progress: F,
    ) -> Self
    where
        F: FnMut(u64, u64),
    {
        let mut primes = Vec::new();
        let mut ranks = RankIndex::new();
        let mut seen = u64::from(bound >= 2);

        for k in bitmap.iter_ones() {
            if k > bound {
                break;
            }
            if k < 3 || k % 2 == 0 {
                continue;
            }
            ranks.insert(k, primes.len() as u64);
            primes.push(k);

            seen += 1;
            if interval != 0 && seen % interval == 0 {
                progress(seen, k);
            }
        }

        Self {
            bound,
            primes,
            ranks,
        }
    }

    /// Rebuild a store from a persisted list and index pair
    ///
    /// The list must be strictly ascending, odd, greater than 2 and within
    /// the bound; the index must map exactly `list[i] → i`.
    pub fn from_parts(bound: u64, primes: Vec<u64>, ranks: RankIndex) -> Result<Self> {
        validate_list(bound, &primes)?;
        if ranks.len() != primes.len() {
            return Err(PrimedexError::CorruptedData);
        }
        for (position, p) in primes.iter().enumerate() {
            if ranks.get(p) != Some(&(position as u64)) {
                return Err(PrimedexError::CorruptedData);
            }
        }
        Ok(Self {
            bound,
            primes,
            ranks,
        })
    }

    /// Bound this store was derived for
    pub fn bound(&self) -> u64 {
        self.bound
    }

    /// The ascending prime list
    pub fn primes(&self) -> &[u64] {
        &self.primes
    }

    /// The value→rank index
    pub fn rank_index(&self) -> &RankIndex {
        &self.ranks
    }

    /// Number of primes in the list (2 excluded)
    pub fn len(&self) -> usize {
        self.primes.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.primes.is_empty()
    }

    /// Prime at a 0-based position
    pub fn prime_at(&self, index: usize) -> Option<u64> {
        self.primes.get(index).copied()
    }

    /// Rank of `value`, if it is an indexed prime
    pub fn rank_of(&self, value: u64) -> Option<u64> {
        self.ranks.get(&value).copied()
    }

    /// Largest prime found, absent when the list is empty
    pub fn max_prime(&self) -> Option<u64> {
        self.primes.last().copied()
    }
}

fn validate_list(bound: u64, primes: &[u64]) -> Result<()> {
    let mut previous = 2u64;
    for &p in primes {
        if p <= previous || p % 2 == 0 || p > bound {
            return Err(PrimedexError::CorruptedData);
        }
        previous = p;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sieve::sieve;
    use alloc::vec;

    fn store_for(bound: u64) -> PrimeStore {
        PrimeStore::derive(&sieve(bound).unwrap(), bound)
    }

    #[test]
    fn test_bound_ten() {
        let store = store_for(10);
        assert_eq!(store.primes(), &[3, 5, 7]);
        assert_eq!(store.rank_of(3), Some(0));
        assert_eq!(store.rank_of(5), Some(1));
        assert_eq!(store.rank_of(7), Some(2));
        assert_eq!(store.rank_index().len(), 3);
        assert_eq!(store.max_prime(), Some(7));
    }

    #[test]
    fn test_bound_twenty() {
        let store = store_for(20);
        assert_eq!(store.primes(), &[3, 5, 7, 11, 13, 17, 19]);
        assert_eq!(store.rank_of(13), Some(4));
        assert_eq!(store.max_prime(), Some(19));
        assert_eq!(store.prime_at(1), Some(5));
        assert_eq!(store.prime_at(7), None);
    }

    #[test]
    fn test_two_is_never_listed() {
        for bound in [2u64, 3, 10, 100] {
            let store = store_for(bound);
            assert!(!store.primes().contains(&2));
            assert_eq!(store.rank_of(2), None);
        }
    }

    #[test]
    fn test_small_bounds_are_empty() {
        for bound in 0..3u64 {
            let store = store_for(bound);
            assert!(store.is_empty());
            assert_eq!(store.max_prime(), None);
        }
    }

    #[test]
    fn test_list_properties() {
        for bound in 0..500u64 {
            let store = store_for(bound);
            let primes = store.primes();
            assert!(primes.windows(2).all(|w| w[0] < w[1]));
            assert!(primes.iter().all(|&p| p % 2 == 1 && p > 2 && p <= bound));
            assert!(primes
                .iter()
                .all(|&p| (3..p).take_while(|d| d * d <= p).all(|d| p % d != 0)));
            assert_eq!(store.rank_index().len(), primes.len());
            for (position, &p) in primes.iter().enumerate() {
                assert_eq!(store.rank_of(p), Some(position as u64));
            }
            assert_eq!(store.max_prime(), primes.last().copied());
        }
    }

    #[test]
    fn test_derive_respects_smaller_bound() {
        let bitmap = sieve(100).unwrap();
        let store = PrimeStore::derive(&bitmap, 20);
        assert_eq!(store.max_prime(), Some(19));
        assert_eq!(store.len(), 7);
    }

    #[test]
    fn test_progress_counts_two() {
        let bitmap = sieve(100).unwrap();
        let mut calls = vec![];
        PrimeStore::derive_with_progress(&bitmap, 100, 5, |count, prime| {
            calls.push((count, prime))
        });
        // 2, 3, 5, 7, 11 → the 5th prime is 11
        assert_eq!(calls.first(), Some(&(5, 11)));
        assert_eq!(calls.len(), 25 / 5);

        let mut silent = 0;
        PrimeStore::derive_with_progress(&bitmap, 100, 0, |_, _| silent += 1);
        assert_eq!(silent, 0);
    }

    #[test]
    fn test_from_parts_round_trip() {
        let store = store_for(50);
        let rebuilt = PrimeStore::from_parts(
            50,
            store.primes().to_vec(),
            store.rank_index().clone(),
        )
        .unwrap();
        assert_eq!(rebuilt, store);
    }

    fn index_of(primes: &[u64]) -> RankIndex {
        primes
            .iter()
            .enumerate()
            .map(|(rank, &p)| (p, rank as u64))
            .collect()
    }

    #[test]
    fn test_from_parts_rejects_corruption() {
        for (bound, primes) in [(20, vec![3, 7, 5]), (20, vec![2, 3]), (5, vec![3, 5, 7])] {
            let ranks = index_of(&primes);
            assert_eq!(
                PrimeStore::from_parts(bound, primes, ranks),
                Err(PrimedexError::CorruptedData)
            );
        }

        let mut ranks = RankIndex::new();
        ranks.insert(3, 0);
        ranks.insert(5, 2);
        assert_eq!(
            PrimeStore::from_parts(10, vec![3, 5], ranks),
            Err(PrimedexError::CorruptedData)
        );
    }
}
