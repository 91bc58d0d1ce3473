//! Little-endian payload encoding for artifact blobs

use alloc::vec::Vec;

use crate::validation::validate_array_bounds;
use crate::{PrimedexError, Result};

/// Append `words` to `out` as little-endian u64 values
pub fn encode_words(words: &[u64], out: &mut Vec<u8>) {
    #[cfg(target_endian = "little")]
    out.extend_from_slice(bytemuck::cast_slice(words));

    #[cfg(not(target_endian = "little"))]
    for word in words {
        out.extend_from_slice(&word.to_le_bytes());
    }
}

/// Decode a little-endian u64 payload
///
/// Aligned input (the memory-mapped case) is reinterpreted in place;
/// unaligned input is decoded chunk by chunk.
pub fn decode_words(bytes: &[u8]) -> Result<Vec<u64>> {
    let count = validate_array_bounds::<u64>(bytes.len())?;

    let words = match bytemuck::try_cast_slice::<u8, u64>(bytes) {
        Ok(aligned) => aligned.iter().map(|&w| u64::from_le(w)).collect(),
        Err(_) => {
            let mut words = Vec::with_capacity(count);
            for chunk in bytes.chunks_exact(8) {
                let array: [u8; 8] = chunk
                    .try_into()
                    .map_err(|_| PrimedexError::CorruptedData)?;
                words.push(u64::from_le_bytes(array));
            }
            words
        }
    };

    Ok(words)
}

/// Append (value, rank) pairs to `out`
pub fn encode_pairs<I>(pairs: I, out: &mut Vec<u8>)
where
    I: IntoIterator<Item = (u64, u64)>,
{
    for (value, rank) in pairs {
        out.extend_from_slice(&value.to_le_bytes());
        out.extend_from_slice(&rank.to_le_bytes());
    }
}

/// Decode a payload of (value, rank) pairs
pub fn decode_pairs(bytes: &[u8]) -> Result<Vec<(u64, u64)>> {
    if bytes.len() % 16 != 0 {
        return Err(PrimedexError::CorruptedData);
    }
    let words = decode_words(bytes)?;
    Ok(words.chunks_exact(2).map(|pair| (pair[0], pair[1])).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_words_are_little_endian() {
        let mut out = Vec::new();
        encode_words(&[1, 0x0102_0304_0506_0708], &mut out);
        assert_eq!(out.len(), 16);
        assert_eq!(out[0], 1);
        assert_eq!(&out[8..16], &[8, 7, 6, 5, 4, 3, 2, 1]);
        assert_eq!(decode_words(&out), Ok(vec![1, 0x0102_0304_0506_0708]));
    }

    #[test]
    fn test_decode_unaligned_input() {
        let mut out = vec![0u8];
        encode_words(&[3, 5, 7], &mut out);
        assert_eq!(decode_words(&out[1..]), Ok(vec![3, 5, 7]));
    }

    #[test]
    fn test_decode_rejects_partial_words() {
        assert_eq!(decode_words(&[0u8; 12]), Err(PrimedexError::ArrayAlignment));
        assert_eq!(decode_pairs(&[0u8; 24]), Err(PrimedexError::CorruptedData));
    }

    #[test]
    fn test_pairs() {
        let mut out = Vec::new();
        encode_pairs([(3, 0), (5, 1), (7, 2)], &mut out);
        assert_eq!(decode_pairs(&out), Ok(vec![(3, 0), (5, 1), (7, 2)]));
    }
}
