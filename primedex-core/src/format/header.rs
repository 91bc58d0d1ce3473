//! Artifact header format definitions
//!
//! Every persisted blob (bitmap, prime list, rank index) starts with the same
//! 32-byte little-endian header. The header carries the cache key of the blob:
//! the bound it was built for and the format version that wrote it.

use super::constants::{FORMAT_VERSION, HEADER_SIZE, MAGIC};
use crate::{PrimedexError, Result};

/// Kinds of persisted artifacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ArtifactKind {
    /// Packed primality bitmap, one bit per integer in [0, bound]
    Bitmap = 0,
    /// Ascending list of odd primes
    List = 1,
    /// (prime, rank) pairs
    Index = 2,
}

impl ArtifactKind {
    /// Convert from u8 representation
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(ArtifactKind::Bitmap),
            1 => Some(ArtifactKind::List),
            2 => Some(ArtifactKind::Index),
            _ => None,
        }
    }

    /// Convert to u8 representation
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// File-name suffix used for this kind
    pub const fn suffix(self) -> &'static str {
        match self {
            ArtifactKind::Bitmap => "bitmap",
            ArtifactKind::List => "list",
            ArtifactKind::Index => "index",
        }
    }

    /// Payload size in bytes for `count` elements of this kind
    ///
    /// For bitmaps `count` is the number of bits; the payload is padded to
    /// whole `u64` words.
    pub const fn payload_size(self, count: u64) -> Option<u64> {
        match self {
            ArtifactKind::Bitmap => match count.checked_add(63) {
                Some(rounded) => (rounded / 64).checked_mul(8),
                None => None,
            },
            ArtifactKind::List => count.checked_mul(8),
            ArtifactKind::Index => count.checked_mul(16),
        }
    }
}

impl core::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.suffix())
    }
}

/// Fixed-size header for artifact blobs
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArtifactHeader {
    /// Magic bytes: "PDEX"
    pub magic: [u8; 4],
    /// Format version
    pub version: u8,
    /// Artifact kind (bitmap=0, list=1, index=2)
    pub kind: u8,
    /// Padding for alignment
    pub _padding: [u8; 2],
    /// Inclusive sieve bound the artifact was built for
    pub bound: u64,
    /// Element count (bits for bitmaps)
    pub count: u64,
    /// Reserved space for future extensions
    pub reserved: [u8; 8],
}

impl ArtifactHeader {
    /// Size of the header in bytes
    pub const SIZE: usize = HEADER_SIZE;

    /// Create a header for the current format version
    pub const fn new(kind: ArtifactKind, bound: u64, count: u64) -> Self {
        Self {
            magic: MAGIC,
            version: FORMAT_VERSION,
            kind: kind.to_u8(),
            _padding: [0; 2],
            bound,
            count,
            reserved: [0; 8],
        }
    }

    /// Artifact kind, if the stored byte is known
    pub const fn artifact_kind(&self) -> Option<ArtifactKind> {
        ArtifactKind::from_u8(self.kind)
    }

    /// Payload size declared by this header
    pub fn payload_size(&self) -> Result<usize> {
        let kind = self.artifact_kind().ok_or(PrimedexError::InvalidHeader)?;
        let size = kind
            .payload_size(self.count)
            .ok_or(PrimedexError::ArraySizeOverflow)?;
        usize::try_from(size).map_err(|_| PrimedexError::ArraySizeOverflow)
    }

    /// Check that this header belongs to the requested cache key
    ///
    /// Version and bound mismatches are reported as stale, a kind mismatch as
    /// a structural error.
    pub fn check_key(&self, kind: ArtifactKind, bound: u64) -> Result<()> {
        if self.version != FORMAT_VERSION {
            return Err(PrimedexError::UnsupportedVersion);
        }
        if self.kind != kind.to_u8() {
            return Err(PrimedexError::KindMismatch);
        }
        if self.bound != bound {
            return Err(PrimedexError::BoundMismatch);
        }
        Ok(())
    }

    /// Parse header from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(PrimedexError::InsufficientBuffer);
        }

        if bytes[0..4] != MAGIC {
            return Err(PrimedexError::InvalidHeader);
        }

        let version = bytes[4];
        let kind = bytes[5];
        if ArtifactKind::from_u8(kind).is_none() {
            return Err(PrimedexError::InvalidHeader);
        }

        let bound = u64::from_le_bytes(
            bytes[8..16]
                .try_into()
                .map_err(|_| PrimedexError::InvalidHeader)?,
        );
        let count = u64::from_le_bytes(
            bytes[16..24]
                .try_into()
                .map_err(|_| PrimedexError::InvalidHeader)?,
        );
        let mut reserved = [0u8; 8];
        reserved.copy_from_slice(&bytes[24..32]);

        Ok(Self {
            magic: MAGIC,
            version,
            kind,
            _padding: [0; 2],
            bound,
            count,
            reserved,
        })
    }

    /// Convert to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4] = self.version;
        bytes[5] = self.kind;
        // padding bytes remain zero
        bytes[8..16].copy_from_slice(&self.bound.to_le_bytes());
        bytes[16..24].copy_from_slice(&self.count.to_le_bytes());
        bytes[24..32].copy_from_slice(&self.reserved);
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_size_matches_layout() {
        assert_eq!(core::mem::size_of::<ArtifactHeader>(), ArtifactHeader::SIZE);
    }

    #[test]
    fn test_header_bytes_parse_back() {
        let header = ArtifactHeader::new(ArtifactKind::List, 20, 7);
        let bytes = header.to_bytes();
        assert_eq!(&bytes[0..4], b"PDEX");
        assert_eq!(ArtifactHeader::from_bytes(&bytes), Ok(header));
    }

    #[test]
    fn test_header_rejects_bad_magic_and_short_buffers() {
        let mut bytes = ArtifactHeader::new(ArtifactKind::Bitmap, 10, 11).to_bytes();
        assert_eq!(
            ArtifactHeader::from_bytes(&bytes[..16]),
            Err(PrimedexError::InsufficientBuffer)
        );
        bytes[0] = b'X';
        assert_eq!(
            ArtifactHeader::from_bytes(&bytes),
            Err(PrimedexError::InvalidHeader)
        );
    }

    #[test]
    fn test_header_rejects_unknown_kind() {
        let mut bytes = ArtifactHeader::new(ArtifactKind::Index, 10, 3).to_bytes();
        bytes[5] = 9;
        assert_eq!(
            ArtifactHeader::from_bytes(&bytes),
            Err(PrimedexError::InvalidHeader)
        );
    }

    #[test]
    fn test_expect_reports_stale_keys() {
        let header = ArtifactHeader::new(ArtifactKind::List, 20, 7);
        assert_eq!(header.check_key(ArtifactKind::List, 20), Ok(()));
        assert_eq!(
            header.check_key(ArtifactKind::List, 21),
            Err(PrimedexError::BoundMismatch)
        );
        assert_eq!(
            header.check_key(ArtifactKind::Index, 20),
            Err(PrimedexError::KindMismatch)
        );

        let mut old = header;
        old.version = FORMAT_VERSION.wrapping_add(1);
        let err = old.check_key(ArtifactKind::List, 20).unwrap_err();
        assert_eq!(err, PrimedexError::UnsupportedVersion);
        assert!(err.is_stale());
    }

    #[test]
    fn test_payload_size() {
        assert_eq!(ArtifactKind::Bitmap.payload_size(0), Some(0));
        assert_eq!(ArtifactKind::Bitmap.payload_size(1), Some(8));
        assert_eq!(ArtifactKind::Bitmap.payload_size(64), Some(8));
        assert_eq!(ArtifactKind::Bitmap.payload_size(65), Some(16));
        assert_eq!(ArtifactKind::List.payload_size(7), Some(56));
        assert_eq!(ArtifactKind::Index.payload_size(7), Some(112));
        assert_eq!(ArtifactKind::Index.payload_size(u64::MAX), None);
    }
}
