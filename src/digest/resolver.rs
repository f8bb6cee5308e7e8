//! Digest Resolver
//!
//! Prefers a constant-time fast digest from the filesystem; falls back to
//! reading and hashing the content, consulting the [`DigestCache`] first.

use crate::concurrency::LargeFileGate;
use crate::digest::key::CacheKey;
use crate::digest::store::DigestCache;
use crate::error::DigestError;
use crate::fs::{FastDigestSource, FileSystem};
use crate::types::{Digest, SizeHint};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, trace};

/// Resolves file digests for one filesystem.
pub struct DigestResolver {
    fs: Arc<dyn FileSystem>,
    cache: Arc<DigestCache>,
    gate: Arc<LargeFileGate>,
}

impl DigestResolver {
    /// Create a resolver using the process-wide large-file gate
    pub fn new(fs: Arc<dyn FileSystem>, cache: Arc<DigestCache>) -> Self {
        Self::with_gate(fs, cache, LargeFileGate::shared())
    }

    /// Create a resolver sharing `gate` with other resolvers
    pub fn with_gate(
        fs: Arc<dyn FileSystem>,
        cache: Arc<DigestCache>,
        gate: Arc<LargeFileGate>,
    ) -> Self {
        Self { fs, cache, gate }
    }

    pub fn cache(&self) -> &Arc<DigestCache> {
        &self.cache
    }

    pub fn gate(&self) -> &Arc<LargeFileGate> {
        &self.gate
    }

    /// Digest of `path`, from `fast` if it has one, computed manually otherwise.
    ///
    /// A fast digest is returned as is; neither the cache nor the file content
    /// is touched. When the fast digest is already known to be unavailable,
    /// call [`compute_manually`](Self::compute_manually) directly.
    pub fn digest_with_fallback(
        &self,
        path: &Path,
        size: SizeHint,
        fast: &dyn FastDigestSource,
    ) -> Result<Digest, DigestError> {
        if let Some(digest) = fast
            .fast_digest(path)
            .map_err(|e| DigestError::io(path, e))?
        {
            trace!(path = %path.display(), "Fast digest available");
            return Ok(digest);
        }
        self.compute_manually(path, size)
    }

    /// Like [`digest_with_fallback`](Self::digest_with_fallback) for files
    /// whose size is not known.
    ///
    /// The content read is never serialized by the large-file gate, so avoid
    /// this for many concurrent large files.
    pub fn digest_with_fallback_when_size_unknown(
        &self,
        path: &Path,
        fast: &dyn FastDigestSource,
    ) -> Result<Digest, DigestError> {
        self.digest_with_fallback(path, SizeHint::Unknown, fast)
    }

    /// Read and hash `path`, using the digest cache when it is enabled.
    ///
    /// A cache hit returns without reading content, on the assumption that
    /// unchanged metadata means unchanged content.
    ///
    /// # Panics
    ///
    /// If the filesystem reads the file but returns no digest for it.
    pub fn compute_manually(&self, path: &Path, size: SizeHint) -> Result<Digest, DigestError> {
        // One store for the lookup and the insert, even across a reconfigure.
        let cached = match self.cache.snapshot() {
            Some(store) => {
                let status = self.fs.stat(path).map_err(|e| DigestError::io(path, e))?;
                let key = CacheKey::new(path, &status);
                if let Some(digest) = store.get(&key) {
                    debug!(path = %path.display(), "Digest cache hit");
                    return Ok(digest);
                }
                Some((store, key))
            }
            None => None,
        };

        let digest = self
            .gate
            .run(size, || self.fs.digest(path))
            .map_err(|e| DigestError::io(path, e))?;
        let Some(digest) = digest else {
            panic!("Missing digest for {} ({})", path.display(), size);
        };

        if let Some((store, key)) = cached {
            store.insert(key, digest.clone());
        }
        Ok(digest)
    }
}
