//! Segmented Sieve of Eratosthenes over a packed bitmap
//!
//! Strategy:
//!   1. Mark every integer in `[0, bound]` as a candidate, then drop 0, 1 and
//!      every even number except 2 (a word-wide mask, since word bases are even)
//!   2. Sieve the prefix `[0, √bound]` to find the base primes
//!   3. Walk the full range in L1-sized segments, striking odd multiples of
//!      each base prime from `p²` upward in steps of `2p`
//!
//! Every base prime strikes a segment before the walk moves on.

use alloc::vec::Vec;

use crate::bitmap::PrimeBitmap;
use crate::format::constants::SEGMENT_BYTES;
use crate::validation::validate_bound;
use crate::Result;

/// Bits at odd positions within a word (word bases are multiples of 64)
const ODD_BITS: u64 = 0xAAAA_AAAA_AAAA_AAAA;

/// Integer square root, exact for all u64 values
///
/// Newton iteration from a power-of-two overestimate; no floating point, so
/// it stays available without std.
pub fn isqrt(n: u64) -> u64 {
    if n < 2 {
        return n;
    }
    let mut x = 1u64 << ((64 - n.leading_zeros()).div_ceil(2));
    loop {
        let y = (x + n / x) / 2;
        if y >= x {
            return x;
        }
        x = y;
    }
}

/// Builder for the primality bitmap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SieveBuilder {
    segment_bits: u64,
}

impl Default for SieveBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SieveBuilder {
    /// Create a builder with the default L1-sized segment
    pub const fn new() -> Self {
        Self {
            segment_bits: (SEGMENT_BYTES * 8) as u64,
        }
    }

    /// Use a different segment size (rounded up to whole words, at least one)
    pub const fn with_segment_bytes(mut self, bytes: usize) -> Self {
        let words = if bytes < 8 { 1 } else { bytes.div_ceil(8) };
        self.segment_bits = (words as u64).saturating_mul(64);
        self
    }

    /// Segment size in bits
    pub const fn segment_bits(&self) -> u64 {
        self.segment_bits
    }

    /// Compute the primality bitmap for `[0, bound]`
    ///
    /// Bit `k` is set iff `k` is prime. Bounds below 2 produce a bitmap with
    /// no set bits.
    pub fn build(&self, bound: u64) -> Result<PrimeBitmap> {
        let len = validate_bound(bound)?;
        let mut bitmap = PrimeBitmap::new(len, true)?;

        for word in bitmap.words_mut() {
            *word &= ODD_BITS;
        }
        bitmap.clear(1);
        bitmap.set(2);

        let root = isqrt(bound);
        let base_primes = sieve_prefix(&mut bitmap, root);

        let mut lo = 0u64;
        while lo <= bound {
            let hi = lo.saturating_add(self.segment_bits - 1).min(bound);
            for &p in &base_primes {
                strike_segment(bitmap.words_mut(), p, lo, hi);
            }
            lo = match hi.checked_add(1) {
                Some(next) => next,
                None => break,
            };
        }

        Ok(bitmap)
    }
}

/// Sieve `[3, root]` in place and return the odd primes found there
fn sieve_prefix(bitmap: &mut PrimeBitmap, root: u64) -> Vec<u64> {
    let mut k = 3u64;
    while k * k <= root {
        if bitmap.get(k) {
            strike_segment(bitmap.words_mut(), k, 0, root);
        }
        k += 2;
    }

    let mut base = Vec::new();
    let mut k = 3u64;
    while k <= root {
        if bitmap.get(k) {
            base.push(k);
        }
        k += 2;
    }
    base
}

/// Clear odd multiples of `p` in `[max(p², lo), hi]`
#[inline]
fn strike_segment(words: &mut [u64], p: u64, lo: u64, hi: u64) {
    let square = p * p;
    let mut j = if square >= lo {
        square
    } else {
        let multiple = lo.div_ceil(p) * p;
        if multiple % 2 == 0 {
            multiple + p
        } else {
            multiple
        }
    };

    let step = 2 * p;
    while j <= hi {
        words[(j >> 6) as usize] &= !(1u64 << (j & 63));
        j += step;
    }
}

/// Compute the primality bitmap for `[0, bound]` with the default builder
pub fn sieve(bound: u64) -> Result<PrimeBitmap> {
    SieveBuilder::new().build(bound)
}
