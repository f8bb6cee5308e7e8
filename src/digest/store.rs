//! Digest Store
//!
//! Optional bounded cache of manually computed digests, keyed by
//! [`CacheKey`]. Enabling it trades correctness for speed: a file whose content
//! changes without any change to path, node id, mtime or size keeps its old
//! digest until the entry is evicted or the cache is reconfigured.

use crate::digest::key::CacheKey;
use crate::error::DigestError;
use crate::types::Digest;
use moka::policy::EvictionPolicy;
use moka::sync::Cache;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Immutable snapshot of digest cache counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hit_count: u64,
    pub miss_count: u64,
    /// Entries removed to stay within capacity
    pub eviction_count: u64,
}

impl CacheStats {
    pub fn request_count(&self) -> u64 {
        self.hit_count.saturating_add(self.miss_count)
    }

    /// Ratio of hits to requests; 1.0 when there were no requests.
    pub fn hit_rate(&self) -> f64 {
        match self.request_count() {
            0 => 1.0,
            requests => self.hit_count as f64 / requests as f64,
        }
    }

    /// Ratio of misses to requests; 0.0 when there were no requests.
    pub fn miss_rate(&self) -> f64 {
        match self.request_count() {
            0 => 0.0,
            requests => self.miss_count as f64 / requests as f64,
        }
    }
}

/// One configured generation of the cache. Replaced wholesale on reconfigure.
pub(crate) struct BoundedStore {
    entries: Cache<CacheKey, Digest>,
    max_entries: u64,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: Arc<AtomicU64>,
}

impl BoundedStore {
    fn new(max_entries: u64) -> Self {
        let evictions = Arc::new(AtomicU64::new(0));
        let listener_evictions = evictions.clone();
        let entries = Cache::builder()
            .max_capacity(max_entries)
            .eviction_policy(EvictionPolicy::lru())
            .eviction_listener(move |_key, _value, cause| {
                if cause.was_evicted() {
                    listener_evictions.fetch_add(1, Ordering::Relaxed);
                }
            })
            .build();

        Self {
            entries,
            max_entries,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions,
        }
    }

    pub(crate) fn get(&self, key: &CacheKey) -> Option<Digest> {
        let found = self.entries.get(key);
        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        found
    }

    pub(crate) fn insert(&self, key: CacheKey, digest: Digest) {
        debug!(path = %key.path().display(), digest = %hex::encode(&digest), "Digest cached");
        self.entries.insert(key, digest);
    }

    fn stats(&self) -> CacheStats {
        self.entries.run_pending_tasks();
        CacheStats {
            hit_count: self.hits.load(Ordering::Relaxed),
            miss_count: self.misses.load(Ordering::Relaxed),
            eviction_count: self.evictions.load(Ordering::Relaxed),
        }
    }
}

/// Configurable digest cache service
///
/// Absent (disabled) until [`DigestCache::configure`] is called with a
/// non-zero capacity. Readers clone the current store out of the lock, so a
/// concurrent reconfigure is observed as either the old or the new store,
/// never a partially built one.
pub struct DigestCache {
    current: RwLock<Option<Arc<BoundedStore>>>,
}

impl DigestCache {
    /// Create a cache service with caching disabled
    pub fn disabled() -> Self {
        Self {
            current: RwLock::new(None),
        }
    }

    /// Create a cache service already configured with `max_entries`
    pub fn with_capacity(max_entries: u64) -> Self {
        let cache = Self::disabled();
        cache.configure(max_entries);
        cache
    }

    /// Enable caching with room for `max_entries` digests, or disable it with 0.
    ///
    /// Always a full reset: previous entries and statistics are dropped even
    /// when the capacity is unchanged.
    pub fn configure(&self, max_entries: u64) {
        let next = if max_entries == 0 {
            None
        } else {
            Some(Arc::new(BoundedStore::new(max_entries)))
        };
        *self.current.write() = next;
        if max_entries == 0 {
            info!("Digest cache disabled");
        } else {
            info!(max_entries, "Digest cache configured");
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.current.read().is_some()
    }

    /// Configured capacity, or `None` when disabled
    pub fn max_entries(&self) -> Option<u64> {
        self.snapshot().map(|store| store.max_entries)
    }

    /// Statistics for the current configuration.
    ///
    /// Fails with [`DigestError::CacheDisabled`] when caching is not enabled,
    /// whether it was never configured or configured with 0.
    pub fn stats(&self) -> Result<CacheStats, DigestError> {
        self.snapshot()
            .map(|store| store.stats())
            .ok_or(DigestError::CacheDisabled)
    }

    /// Look up a digest. Always `None` while disabled.
    pub fn get(&self, key: &CacheKey) -> Option<Digest> {
        self.snapshot()?.get(key)
    }

    /// Store a digest. No-op while disabled.
    pub fn insert(&self, key: CacheKey, digest: Digest) {
        if let Some(store) = self.snapshot() {
            store.insert(key, digest);
        }
    }

    /// Number of cached digests (approximate until pending tasks run)
    pub fn entry_count(&self) -> u64 {
        self.snapshot()
            .map(|store| store.entries.entry_count())
            .unwrap_or(0)
    }

    /// Apply deferred maintenance (including evictions) now.
    pub fn run_pending_tasks(&self) {
        if let Some(store) = self.snapshot() {
            store.entries.run_pending_tasks();
        }
    }

    /// The store of the current configuration, held for one operation.
    pub(crate) fn snapshot(&self) -> Option<Arc<BoundedStore>> {
        self.current.read().clone()
    }
}

impl Default for DigestCache {
    fn default() -> Self {
        Self::disabled()
    }
}
