//! Serialization of large-file content reads
//!
//! Many concurrent reads of large files thrash the disk with seeks, so manual
//! digests of files above a size threshold take a shared lock. Small files and
//! files of unknown size are digested without it.

use crate::types::SizeHint;
use parking_lot::Mutex;
use std::sync::{Arc, OnceLock};

/// Default size above which manual digests are serialized (bytes).
pub const DEFAULT_LARGE_FILE_THRESHOLD: u64 = 4096;

/// Shared gate for large-file digesting
///
/// Share one gate (via `Arc`) between every resolver whose reads should be
/// serialized together.
pub struct LargeFileGate {
    threshold: u64,
    lock: Mutex<()>,
}

impl LargeFileGate {
    /// Create a gate that serializes files larger than `threshold` bytes
    pub fn new(threshold: u64) -> Self {
        Self {
            threshold,
            lock: Mutex::new(()),
        }
    }

    /// Process-wide gate with the default threshold
    ///
    /// Every call returns the same gate.
    pub fn shared() -> Arc<LargeFileGate> {
        static SHARED: OnceLock<Arc<LargeFileGate>> = OnceLock::new();
        SHARED
            .get_or_init(|| Arc::new(LargeFileGate::default()))
            .clone()
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Whether a read with this size hint must hold the gate.
    ///
    /// `Unknown` never does.
    pub fn requires_serial(&self, size: SizeHint) -> bool {
        match size {
            SizeHint::Known(size) => size > self.threshold,
            SizeHint::Unknown => false,
        }
    }

    /// Run `f`, holding the gate if `size` requires it
    pub fn run<T>(&self, size: SizeHint, f: impl FnOnce() -> T) -> T {
        if self.requires_serial(size) {
            let _guard = self.lock.lock();
            f()
        } else {
            f()
        }
    }
}

impl Default for LargeFileGate {
    fn default() -> Self {
        Self::new(DEFAULT_LARGE_FILE_THRESHOLD)
    }
}
