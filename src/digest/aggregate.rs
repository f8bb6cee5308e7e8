//! Order-independent aggregate over (path, digest) contributions.

use crate::digest::combine::combine_into;
use crate::digest::resolver::DigestResolver;
use crate::error::DigestError;
use crate::fs::FastDigestSource;
use crate::types::{Digest, SizeHint, ESTIMATED_SIZE};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Accumulates a digest of a set of (path, digest) pairs
///
/// Each pair is hashed together before being XORed in, so the result is a
/// function of the set of pairs rather than of the set of paths and the set
/// of digests separately. Adding a path twice is rejected; under XOR the two
/// contributions would cancel silently.
#[derive(Debug, Default)]
pub struct UnorderedDigest {
    acc: Digest,
    seen: HashSet<PathBuf>,
}

impl UnorderedDigest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, path: &Path, digest: &[u8]) -> Result<(), DigestError> {
        if !self.seen.insert(path.to_path_buf()) {
            return Err(DigestError::DuplicateContribution {
                path: path.to_path_buf(),
            });
        }
        combine_into(&mut self.acc, &contribution(path, digest));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Final aggregate; all zeroes when nothing was added.
    pub fn finish(self) -> Digest {
        if self.acc.is_empty() {
            vec![0u8; ESTIMATED_SIZE]
        } else {
            self.acc
        }
    }
}

fn contribution(path: &Path, digest: &[u8]) -> [u8; ESTIMATED_SIZE] {
    // Raw bytes: lossy conversion would map distinct paths to one string.
    let path_bytes = path.as_os_str().as_encoded_bytes();
    let mut hasher = blake3::Hasher::new();
    hasher.update(&(path_bytes.len() as u64).to_le_bytes());
    hasher.update(path_bytes);
    hasher.update(digest);
    *hasher.finalize().as_bytes()
}

/// Aggregate digest of every regular file under `root`.
///
/// Paths are folded in relative to `root`, so moving the whole tree keeps the
/// digest. Symlinks are not followed.
pub fn digest_tree(
    resolver: &DigestResolver,
    fast: &dyn FastDigestSource,
    root: &Path,
) -> Result<Digest, DigestError> {
    let mut aggregate = UnorderedDigest::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            DigestError::Io {
                path,
                source: e.into(),
            }
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let size = entry
            .metadata()
            .map(|m| SizeHint::Known(m.len()))
            .unwrap_or(SizeHint::Unknown);
        let digest = resolver.digest_with_fallback(entry.path(), size, fast)?;
        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        aggregate.add(relative, &digest)?;
    }
    debug!(root = %root.display(), files = aggregate.len(), "Digested tree");
    Ok(aggregate.finish())
}
