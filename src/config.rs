//! Configuration
//!
//! Layered configuration for the digest layer: built-in defaults, the global
//! XDG config file, an optional explicit file, then `VFS_DIGEST__*`
//! environment variables.

pub mod facade;
pub mod merge;
pub mod paths;
pub mod sources;

pub use facade::ConfigLoader;

use crate::concurrency::{LargeFileGate, DEFAULT_LARGE_FILE_THRESHOLD};
use crate::digest::DigestCache;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Digest cache configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of cached digests; 0 disables the cache
    #[serde(default)]
    pub max_entries: u64,
}

fn default_large_file_threshold() -> u64 {
    DEFAULT_LARGE_FILE_THRESHOLD
}

/// Resolver configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Files larger than this many bytes are digested one at a time
    #[serde(default = "default_large_file_threshold")]
    pub large_file_threshold: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            large_file_threshold: default_large_file_threshold(),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DigestConfig {
    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub resolver: ResolverConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DigestConfig {
    /// Digest cache service configured from `cache.max_entries`
    pub fn build_cache(&self) -> DigestCache {
        DigestCache::with_capacity(self.cache.max_entries)
    }

    /// Large-file gate using `resolver.large_file_threshold`
    pub fn build_gate(&self) -> LargeFileGate {
        LargeFileGate::new(self.resolver.large_file_threshold)
    }
}
