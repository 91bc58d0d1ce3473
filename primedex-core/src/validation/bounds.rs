//! Array bounds and size validation for artifact payloads

use crate::format::constants::MAX_BOUND;
use crate::PrimedexError;

/// Validate that a byte length holds a whole number of `T` elements
///
/// Returns the element count.
pub const fn validate_array_bounds<T>(byte_len: usize) -> Result<usize, PrimedexError> {
    let element_size = core::mem::size_of::<T>();

    if byte_len % element_size != 0 {
        return Err(PrimedexError::ArrayAlignment);
    }

    let count = byte_len / element_size;

    // Reject arrays whose byte size could overflow downstream arithmetic
    if count > usize::MAX / 8 {
        return Err(PrimedexError::ArraySizeOverflow);
    }

    Ok(count)
}

/// Validate a sieve bound and return the bitmap length in bits (`bound + 1`)
pub const fn validate_bound(bound: u64) -> Result<u64, PrimedexError> {
    if bound > MAX_BOUND {
        return Err(PrimedexError::BoundTooLarge);
    }
    Ok(bound + 1)
}

/// Number of u64 words needed to hold `bits` bits
pub fn word_count(bits: u64) -> Result<usize, PrimedexError> {
    let words = bits.div_ceil(64);
    usize::try_from(words).map_err(|_| PrimedexError::BoundTooLarge)
}
