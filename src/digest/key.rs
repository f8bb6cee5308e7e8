//! Cache keys derived from a path and its file status.

use crate::fs::FileStatus;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Key for cached digests of files without a fast digest
///
/// Built from every metadata property we have so that most file changes
/// produce a different key. A change that leaves path, node id, mtime and
/// size all equal is not detected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    path: PathBuf,
    node_id: u64,
    modified: SystemTime,
    size: u64,
}

impl CacheKey {
    pub fn new(path: &Path, status: &FileStatus) -> Self {
        Self {
            path: dunce::simplified(path).to_path_buf(),
            node_id: status.node_id,
            modified: status.modified,
            size: status.size,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn node_id(&self) -> u64 {
        self.node_id
    }

    pub fn modified(&self) -> SystemTime {
        self.modified
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}
