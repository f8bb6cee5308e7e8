use crate::integration::support::{BrokenFastDigest, CountingFs, FixedFastDigest};
use std::path::Path;
use std::sync::Arc;
use vfs_digest::fs::{FileSystem, LocalFileSystem, NoFastDigest};
use vfs_digest::{CacheKey, DigestCache, DigestError, DigestResolver, SizeHint};

#[test]
fn fast_digest_bypasses_cache_and_content() {
    let fs = Arc::new(CountingFs::new());
    fs.add("pkg/a.cc", 10, b"int a;");
    let resolver = DigestResolver::new(fs.clone(), Arc::new(DigestCache::with_capacity(16)));

    let fast = FixedFastDigest(vec![0xab; 32]);
    let digest = resolver
        .digest_with_fallback(Path::new("pkg/a.cc"), SizeHint::Known(10), &fast)
        .unwrap();

    assert_eq!(digest, vec![0xab; 32]);
    assert_eq!(fs.calls(), 0);
    let stats = resolver.cache().stats().unwrap();
    assert_eq!(stats.hit_count + stats.miss_count, 0);
}

#[test]
fn fast_digest_error_propagates() {
    let fs = Arc::new(CountingFs::new());
    fs.add("pkg/a.cc", 10, b"int a;");
    let resolver = DigestResolver::new(fs.clone(), Arc::new(DigestCache::disabled()));

    let err = resolver
        .digest_with_fallback_when_size_unknown(Path::new("pkg/a.cc"), &BrokenFastDigest)
        .unwrap_err();
    assert!(matches!(err, DigestError::Io { .. }));
    assert_eq!(fs.calls(), 0);
}

#[test]
fn unchanged_file_served_from_cache() {
    let fs = Arc::new(CountingFs::new());
    fs.add("pkg/a.cc", 10, b"int a;");
    let resolver = DigestResolver::new(fs.clone(), Arc::new(DigestCache::with_capacity(16)));

    let first = resolver
        .digest_with_fallback_when_size_unknown(Path::new("pkg/a.cc"), &NoFastDigest)
        .unwrap();
    let second = resolver
        .digest_with_fallback_when_size_unknown(Path::new("pkg/a.cc"), &NoFastDigest)
        .unwrap();

    assert_eq!(first, CountingFs::digest_of(b"int a;"));
    assert_eq!(first, second);
    assert_eq!(fs.calls(), 1);
}

#[test]
fn reconfigure_drops_cached_digests() {
    let fs = Arc::new(CountingFs::new());
    fs.add("pkg/a.cc", 10, b"int a;");
    let cache = Arc::new(DigestCache::with_capacity(16));
    let resolver = DigestResolver::new(fs.clone(), cache.clone());

    resolver.compute_manually(Path::new("pkg/a.cc"), SizeHint::Unknown).unwrap();
    cache.configure(16);
    resolver.compute_manually(Path::new("pkg/a.cc"), SizeHint::Unknown).unwrap();

    assert_eq!(fs.calls(), 2);
    let stats = cache.stats().unwrap();
    assert_eq!(stats.miss_count, 1);
    assert_eq!(stats.hit_count, 0);
}

#[test]
fn stats_require_enabled_cache() {
    let cache = DigestCache::disabled();
    assert!(matches!(cache.stats(), Err(DigestError::CacheDisabled)));

    cache.configure(8);
    assert!(cache.stats().is_ok());

    cache.configure(0);
    assert!(matches!(cache.stats(), Err(DigestError::CacheDisabled)));
}

#[test]
fn capacity_overflow_loses_an_entry() {
    let fs = Arc::new(CountingFs::new());
    let capacity = 3u64;
    let cache = Arc::new(DigestCache::with_capacity(capacity));
    let resolver = DigestResolver::new(fs.clone(), cache.clone());

    let names: Vec<String> = (0..=capacity).map(|i| format!("f{i}.txt")).collect();
    for name in &names {
        fs.add(name, 4, name.as_bytes());
        resolver.compute_manually(Path::new(name), SizeHint::Known(4)).unwrap();
        cache.run_pending_tasks();
    }

    let recoverable = names
        .iter()
        .filter(|name| {
            let status = fs.stat(Path::new(name.as_str())).unwrap();
            cache.get(&CacheKey::new(Path::new(name.as_str()), &status)).is_some()
        })
        .count() as u64;
    assert!(recoverable < capacity + 1);
    assert!(cache.stats().unwrap().eviction_count >= 1);
}

#[test]
fn local_file_cached_between_requests() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("BUILD");
    std::fs::write(&path, b"filegroup(name = \"srcs\")").unwrap();

    let cache = Arc::new(DigestCache::with_capacity(16));
    let resolver = DigestResolver::new(Arc::new(LocalFileSystem::new()), cache.clone());

    let first = resolver.compute_manually(&path, SizeHint::Known(24)).unwrap();
    let second = resolver.compute_manually(&path, SizeHint::Known(24)).unwrap();

    assert_eq!(first, second);
    assert_eq!(first, blake3::hash(b"filegroup(name = \"srcs\")").as_bytes().to_vec());
    let stats = cache.stats().unwrap();
    assert_eq!(stats.hit_count, 1);
    assert_eq!(stats.miss_count, 1);
}

#[test]
fn local_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let resolver = DigestResolver::new(
        Arc::new(LocalFileSystem::new()),
        Arc::new(DigestCache::with_capacity(16)),
    );
    let err = resolver
        .compute_manually(&dir.path().join("missing"), SizeHint::Unknown)
        .unwrap_err();
    assert!(matches!(err, DigestError::Io { .. }));
}
