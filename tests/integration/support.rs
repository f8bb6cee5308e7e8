use parking_lot::Mutex;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, UNIX_EPOCH};
use vfs_digest::fs::{FastDigestSource, FileStatus, FileSystem};
use vfs_digest::Digest;

/// In-memory filesystem counting content reads.
#[derive(Default)]
pub struct CountingFs {
    files: Mutex<HashMap<PathBuf, (FileStatus, Digest)>>,
    pub digest_calls: AtomicUsize,
    active: AtomicUsize,
    pub max_active: AtomicUsize,
    read_delay: Option<Duration>,
    barrier: Option<Arc<Barrier>>,
}

impl CountingFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every content read sleeps for `delay`, to expose overlapping reads.
    pub fn with_read_delay(delay: Duration) -> Self {
        Self {
            read_delay: Some(delay),
            ..Self::default()
        }
    }

    /// Every content read waits on `barrier` before returning.
    pub fn with_barrier(barrier: Arc<Barrier>) -> Self {
        Self {
            barrier: Some(barrier),
            ..Self::default()
        }
    }

    pub fn add(&self, path: &str, size: u64, content: &[u8]) {
        let status = FileStatus {
            node_id: 1,
            modified: UNIX_EPOCH + Duration::from_secs(1_700_000_000),
            size,
        };
        let digest = blake3::hash(content).as_bytes().to_vec();
        self.files
            .lock()
            .insert(PathBuf::from(path), (status, digest));
    }

    pub fn digest_of(content: &[u8]) -> Digest {
        blake3::hash(content).as_bytes().to_vec()
    }

    pub fn calls(&self) -> usize {
        self.digest_calls.load(Ordering::SeqCst)
    }
}

impl FileSystem for CountingFs {
    fn stat(&self, path: &Path) -> io::Result<FileStatus> {
        self.files
            .lock()
            .get(path)
            .map(|(status, _)| *status)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }

    fn digest(&self, path: &Path) -> io::Result<Option<Digest>> {
        self.digest_calls.fetch_add(1, Ordering::SeqCst);
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.read_delay {
            thread::sleep(delay);
        }
        if let Some(barrier) = &self.barrier {
            barrier.wait();
        }
        let result = self
            .files
            .lock()
            .get(path)
            .map(|(_, digest)| Some(digest.clone()))
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"));
        self.active.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

/// Fast digest source with a fixed answer for every path.
pub struct FixedFastDigest(pub Digest);

impl FastDigestSource for FixedFastDigest {
    fn fast_digest(&self, _path: &Path) -> io::Result<Option<Digest>> {
        Ok(Some(self.0.clone()))
    }
}

/// Fast digest source whose lookups always fail.
pub struct BrokenFastDigest;

impl FastDigestSource for BrokenFastDigest {
    fn fast_digest(&self, _path: &Path) -> io::Result<Option<Digest>> {
        Err(io::Error::new(io::ErrorKind::Other, "xattr read failed"))
    }
}
