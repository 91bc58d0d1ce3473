//! Packed primality bitmap
//!
//! One bit per integer in `[0, len)`, 64 integers per `u64` word, so a bound
//! of 10^9 costs ~119 MiB rather than ~1 GiB for a byte-per-flag layout.
//! Bits past `len` in the last word are always zero.

use alloc::vec::Vec;

use crate::validation::word_count;
use crate::{PrimedexError, Result};

/// Bit-packed container for the sieve result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimeBitmap {
    words: Vec<u64>,
    len: u64,
}

impl PrimeBitmap {
    /// Create a bitmap of `len` bits, all set to `fill`
    ///
    /// Fails with `BoundTooLarge` when the words cannot be allocated.
    pub fn new(len: u64, fill: bool) -> Result<Self> {
        let count = word_count(len)?;
        let mut words = Vec::new();
        words
            .try_reserve_exact(count)
            .map_err(|_| PrimedexError::BoundTooLarge)?;
        words.resize(count, if fill { !0u64 } else { 0 });
        let mut bitmap = Self { words, len };
        bitmap.mask_tail();
        Ok(bitmap)
    }

    /// Rebuild a bitmap from its raw words (for deserialization)
    ///
    /// The word count must match `len` exactly and the padding bits in the
    /// last word must be clear.
    pub fn from_words(words: Vec<u64>, len: u64) -> Result<Self> {
        if words.len() != word_count(len)? {
            return Err(PrimedexError::CorruptedData);
        }
        let bitmap = Self { words, len };
        if let Some(&last) = bitmap.words.last() {
            if last & !bitmap.tail_mask() != 0 {
                return Err(PrimedexError::CorruptedData);
            }
        }
        Ok(bitmap)
    }

    /// Number of bits
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Whether the bitmap holds no bits at all
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Raw words (for serialization)
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    pub(crate) fn words_mut(&mut self) -> &mut [u64] {
        &mut self.words
    }

    /// Heap footprint of the packed bits in bytes
    pub fn byte_size(&self) -> usize {
        self.words.len() * 8
    }

    /// Read bit `index`; out-of-range indices read as false
    #[inline]
    pub fn get(&self, index: u64) -> bool {
        if index >= self.len {
            return false;
        }
        (self.words[(index >> 6) as usize] >> (index & 63)) & 1 == 1
    }

    /// Set bit `index`; out-of-range indices are ignored
    #[inline]
    pub fn set(&mut self, index: u64) {
        if index < self.len {
            self.words[(index >> 6) as usize] |= 1u64 << (index & 63);
        }
    }

    /// Clear bit `index`; out-of-range indices are ignored
    #[inline]
    pub fn clear(&mut self, index: u64) {
        if index < self.len {
            self.words[(index >> 6) as usize] &= !(1u64 << (index & 63));
        }
    }

    /// Number of set bits
    pub fn count_ones(&self) -> u64 {
        self.words.iter().map(|w| u64::from(w.count_ones())).sum()
    }

    /// Iterate the indices of set bits in ascending order
    pub fn iter_ones(&self) -> Ones<'_> {
        Ones {
            words: &self.words,
            word_index: 0,
            current: self.words.first().copied().unwrap_or(0),
        }
    }

    fn tail_mask(&self) -> u64 {
        match self.len % 64 {
            0 => !0u64,
            bits => (1u64 << bits) - 1,
        }
    }

    fn mask_tail(&mut self) {
        let mask = self.tail_mask();
        if let Some(last) = self.words.last_mut() {
            *last &= mask;
        }
    }
}

/// Ascending iterator over set bits (Brian Kernighan: visits only set bits)
pub struct Ones<'a> {
    words: &'a [u64],
    word_index: usize,
    current: u64,
}

impl Iterator for Ones<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        while self.current == 0 {
            self.word_index += 1;
            self.current = *self.words.get(self.word_index)?;
        }
        let tz = u64::from(self.current.trailing_zeros());
        self.current &= self.current - 1;
        Some(((self.word_index as u64) << 6) + tz)
    }
}
