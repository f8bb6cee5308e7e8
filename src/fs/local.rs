//! LocalFileSystem: std::fs metadata and BLAKE3 content digests.

use super::{FileStatus, FileSystem};
use crate::types::Digest;
use std::fs::{File, Metadata};
use std::io;
use std::path::Path;

/// Local disk collaborator.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    pub fn new() -> Self {
        LocalFileSystem
    }
}

#[cfg(unix)]
fn node_id(metadata: &Metadata) -> u64 {
    use std::os::unix::fs::MetadataExt;
    metadata.ino()
}

#[cfg(not(unix))]
fn node_id(_metadata: &Metadata) -> u64 {
    0
}

impl FileSystem for LocalFileSystem {
    fn stat(&self, path: &Path) -> io::Result<FileStatus> {
        let metadata = std::fs::metadata(path)?;
        Ok(FileStatus {
            node_id: node_id(&metadata),
            modified: metadata.modified()?,
            size: metadata.len(),
        })
    }

    fn digest(&self, path: &Path) -> io::Result<Option<Digest>> {
        let mut file = File::open(path)?;
        let mut hasher = blake3::Hasher::new();
        io::copy(&mut file, &mut hasher)?;
        Ok(Some(hasher.finalize().as_bytes().to_vec()))
    }
}
