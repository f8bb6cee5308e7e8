//! Filesystem collaborators: metadata, content hashing and fast digests.

pub mod local;

use crate::types::Digest;
use std::io;
use std::path::Path;
use std::time::SystemTime;

/// Metadata the digest cache keys on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileStatus {
    /// File system identifier of the file (typically the inode number)
    pub node_id: u64,
    pub modified: SystemTime,
    pub size: u64,
}

/// Metadata and content-hash access for manual digests.
pub trait FileSystem: Send + Sync {
    fn stat(&self, path: &Path) -> io::Result<FileStatus>;

    /// Read and hash the file content.
    ///
    /// `Ok(None)` for a readable file breaks the contract; the resolver
    /// treats it as fatal.
    fn digest(&self, path: &Path) -> io::Result<Option<Digest>>;
}

/// Constant-time digest lookup from metadata (e.g. an extended attribute).
pub trait FastDigestSource: Send + Sync {
    /// `Ok(None)` when no fast digest is available for `path`.
    fn fast_digest(&self, path: &Path) -> io::Result<Option<Digest>>;
}

/// Source that never has a fast digest.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFastDigest;

impl FastDigestSource for NoFastDigest {
    fn fast_digest(&self, _path: &Path) -> io::Result<Option<Digest>> {
        Ok(None)
    }
}

pub use local::LocalFileSystem;
