//! Shared Cache Module
//!
//! A cloneable handle that serialises every operation on one cache behind a
//! single lock, for callers that share the cache across threads.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::cache::{BoundedTtlCache, CacheStats, SizeReport};
use crate::config::CacheConfig;

// == Shared Cache ==
/// Thread-safe handle to a `BoundedTtlCache`.
///
/// A write and the sweep it triggers, or a read and the lazy expiry it
/// performs, run under the same lock acquisition. Clones share the cache.
#[derive(Debug, Clone)]
pub struct SharedCache {
    inner: Arc<Mutex<BoundedTtlCache>>,
}

impl SharedCache {
    /// Wraps an existing cache.
    pub fn new(cache: BoundedTtlCache) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    /// Builds a shared cache from configuration.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(BoundedTtlCache::from_config(config))
    }

    /// See [`BoundedTtlCache::set`].
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.lock().set(key, value);
    }

    /// See [`BoundedTtlCache::set_with_ttl`].
    pub fn set_with_ttl(&self, key: impl Into<String>, value: impl Into<String>, ttl_seconds: u64) {
        self.inner.lock().set_with_ttl(key, value, ttl_seconds);
    }

    /// See [`BoundedTtlCache::get`].
    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.lock().get(key)
    }

    pub fn report_size(&self) -> SizeReport {
        self.inner.lock().report_size()
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    /// Runs `f` with exclusive access to the underlying cache.
    pub fn with_cache<R>(&self, f: impl FnOnce(&mut BoundedTtlCache) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl Default for SharedCache {
    fn default() -> Self {
        Self::new(BoundedTtlCache::default())
    }
}
