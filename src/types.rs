//! Core types shared by the digest layer.

/// Digest: opaque content digest bytes
///
/// Nothing beyond byte equality and XOR-combinability is assumed, so the
/// length is not fixed at the type level.
pub type Digest = Vec<u8>;

/// Typical size of a digest in bytes (BLAKE3 / SHA-256 output).
pub const ESTIMATED_SIZE: usize = 32;

/// Size hint for a manual digest computation.
///
/// Lets the resolver decide whether a content read has to be serialized
/// with other large reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeHint {
    Known(u64),
    /// Size not known; skips large-file serialization.
    Unknown,
}

impl From<u64> for SizeHint {
    fn from(size: u64) -> Self {
        SizeHint::Known(size)
    }
}

impl From<i64> for SizeHint {
    /// Negative sizes (the conventional `-1`) mean unknown.
    fn from(size: i64) -> Self {
        u64::try_from(size)
            .map(SizeHint::Known)
            .unwrap_or(SizeHint::Unknown)
    }
}

impl std::fmt::Display for SizeHint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SizeHint::Known(size) => write!(f, "{} bytes", size),
            SizeHint::Unknown => write!(f, "unknown size"),
        }
    }
}
