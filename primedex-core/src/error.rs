//! Error types for primedex operations

/// Errors that can occur while building, decoding or validating prime artifacts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimedexError {
    /// Magic bytes or header layout are wrong
    InvalidHeader,
    /// Artifact was written by a different format version
    UnsupportedVersion,
    /// Header describes a different artifact kind than expected
    KindMismatch,
    /// Artifact was built for a different bound
    BoundMismatch,
    /// Payload does not agree with its header or with itself
    CorruptedData,
    /// Buffer too small for the declared contents
    InsufficientBuffer,
    /// Byte length is not a whole number of elements
    ArrayAlignment,
    /// Size calculation would overflow
    ArraySizeOverflow,
    /// Text could not be parsed as an integer
    InvalidNumber,
    /// Bound cannot be addressed on this platform
    BoundTooLarge,
}

impl PrimedexError {
    /// Whether this error means "built under another cache key" rather than "broken"
    pub const fn is_stale(&self) -> bool {
        matches!(
            self,
            PrimedexError::UnsupportedVersion | PrimedexError::BoundMismatch
        )
    }
}

impl core::fmt::Display for PrimedexError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            PrimedexError::InvalidHeader => "Invalid artifact header",
            PrimedexError::UnsupportedVersion => "Unsupported artifact format version",
            PrimedexError::KindMismatch => "Artifact kind does not match",
            PrimedexError::BoundMismatch => "Artifact bound does not match",
            PrimedexError::CorruptedData => "Data corruption detected",
            PrimedexError::InsufficientBuffer => "Insufficient buffer space",
            PrimedexError::ArrayAlignment => "Array size not aligned to element size",
            PrimedexError::ArraySizeOverflow => "Array size overflow",
            PrimedexError::InvalidNumber => "Not an integer",
            PrimedexError::BoundTooLarge => "Bound too large for this platform",
        };
        write!(f, "{msg}")
    }
}

impl core::error::Error for PrimedexError {}

/// Result type for primedex operations
pub type Result<T> = core::result::Result<T, PrimedexError>;
