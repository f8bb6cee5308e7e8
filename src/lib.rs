//! vfs-digest: File Digests for Build File-System Layers
//!
//! Resolves file content digests (fast metadata digest first, manual content
//! hash otherwise), optionally caches manual digests keyed by file metadata,
//! and combines digests into order-independent aggregates.

pub mod concurrency;
pub mod config;
pub mod digest;
pub mod error;
pub mod fs;
pub mod logging;
pub mod types;

pub use digest::{combine, CacheKey, CacheStats, DigestCache, DigestResolver, UnorderedDigest};
pub use error::DigestError;
pub use types::{Digest, SizeHint, ESTIMATED_SIZE};
