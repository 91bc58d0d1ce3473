//! Format constants and magic bytes for prime artifacts

/// Magic bytes opening every artifact blob
pub const MAGIC: [u8; 4] = *b"PDEX";

/// Current on-disk format version
///
/// Bump whenever the blob layout or the sieve semantics change; artifacts
/// carrying any other version are treated as stale and rebuilt.
pub const FORMAT_VERSION: u8 = 1;

/// Fixed size of every artifact header
pub const HEADER_SIZE: usize = 32;

/// Sieve segment size in bytes (fits in L1 on common x86/ARM parts)
pub const SEGMENT_BYTES: usize = 32 * 1024;

/// Largest accepted sieve segment size in bytes
pub const MAX_SEGMENT_BYTES: usize = 1 << 30;

/// Default number of primes between progress callbacks
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 1_000_000;

/// Largest bound whose bitmap stays addressable
pub const MAX_BOUND: u64 = (isize::MAX as u64) - 64;
