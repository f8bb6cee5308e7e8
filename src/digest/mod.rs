//! File digests
//!
//! Fast-or-manual digest resolution, the optional metadata-keyed digest
//! cache, and order-independent combination of digests.

pub mod aggregate;
pub mod combine;
pub mod key;
pub mod resolver;
pub mod store;

pub use aggregate::{digest_tree, UnorderedDigest};
pub use combine::{combine, combine_all, combine_into};
pub use key::CacheKey;
pub use resolver::DigestResolver;
pub use store::{CacheStats, DigestCache};
