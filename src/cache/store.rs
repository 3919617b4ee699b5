//! Cache Store Module
//!
//! Main cache engine: an insertion-ordered map of text entries with per-entry
//! TTL, kept near a soft byte ceiling by oldest-first eviction sweeps.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, trace};

use crate::cache::size::MAP_BASELINE_BYTES;
use crate::cache::{CacheEntry, CacheStats, Clock, InsertionOrder, SizeReport, SystemClock};
use crate::config::{CacheConfig, SizeAccounting};

// == Bounded TTL Cache ==
/// In-process text cache bounded by a soft memory ceiling.
///
/// Writes always succeed. Once the running size estimate passes 80% of the
/// ceiling, the oldest inserted entries are swept out until the estimate is
/// back to 50% of the ceiling. Reads lazily drop entries past their expiry.
#[derive(Debug)]
pub struct BoundedTtlCache {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// First-insertion order of the keys in `entries`
    order: InsertionOrder,
    /// Running size estimate in bytes
    current_size: usize,
    /// Ceiling in bytes
    max_size: usize,
    /// Estimate above which a sweep runs
    trigger_threshold: usize,
    /// Estimate a sweep aims for
    tidy_target: usize,
    /// TTL in seconds used by `set`
    default_ttl: u64,
    accounting: SizeAccounting,
    clock: Arc<dyn Clock>,
    stats: CacheStats,
}

impl BoundedTtlCache {
    // == Constructor ==
    /// Creates a cache with a ceiling of `max_size_kb` kilobytes and the
    /// default TTL and accounting.
    pub fn new(max_size_kb: usize) -> Self {
        Self::from_config(&CacheConfig::with_max_size_kb(max_size_kb))
    }

    /// Creates a cache from configuration, reading time from the system clock.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }

    /// Creates a cache that reads time from `clock`.
    pub fn with_clock(config: &CacheConfig, clock: impl Clock + 'static) -> Self {
        // Ceilings beyond the address space clamp to usize::MAX
        let max_size = config.max_size_kb.saturating_mul(1024);

        Self {
            entries: HashMap::new(),
            order: InsertionOrder::new(),
            current_size: MAP_BASELINE_BYTES,
            max_size,
            trigger_threshold: four_fifths(max_size),
            tidy_target: max_size / 2,
            default_ttl: config.default_ttl,
            accounting: config.size_accounting,
            clock: Arc::new(clock),
            stats: CacheStats::new(),
        }
    }

    // == Set ==
    /// Stores a value under `key` with the default TTL.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let ttl = self.default_ttl;
        self.set_with_ttl(key, value, ttl);
    }

    /// Stores a value under `key`, expiring `ttl_seconds` from now.
    ///
    /// Overwriting keeps the key's original insertion position. The write is
    /// never rejected; if it pushes the estimate over the trigger threshold a
    /// sweep runs before returning, and that sweep may evict this very entry.
    pub fn set_with_ttl(&mut self, key: impl Into<String>, value: impl Into<String>, ttl_seconds: u64) {
        let key = key.into();
        let entry = CacheEntry::new(value.into(), self.clock.now_secs(), ttl_seconds);
        let added = entry.footprint();

        match self.entries.get_mut(&key) {
            Some(existing) => {
                let replaced = existing.footprint();
                *existing = entry;
                if self.accounting == SizeAccounting::Reconciled {
                    self.current_size = self.current_size.saturating_sub(replaced);
                }
            }
            None => {
                self.order.record(&key);
                self.entries.insert(key, entry);
            }
        }

        self.current_size += added;

        if self.current_size > self.trigger_threshold {
            self.tidy();
        }

        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Retrieves the value stored under `key`.
    ///
    /// Returns `None` when the key is absent or expired. An expired entry is
    /// removed on the way out.
    pub fn get(&mut self, key: &str) -> Option<String> {
        let now = self.clock.now_secs();

        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(now),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            if let Some(entry) = self.entries.remove(key) {
                self.order.remove(key);
                if self.accounting == SizeAccounting::Reconciled {
                    self.current_size = self.current_size.saturating_sub(entry.footprint());
                }
                trace!(key, expires_at = entry.expires_at, now, "lazily expired entry");
            }
            self.stats.record_expiration();
            self.stats.set_total_entries(self.entries.len());
            return None;
        }

        self.stats.record_hit();
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Tidy ==
    /// Evicts the oldest inserted entries until the value bytes removed cover
    /// the gap between the estimate and the tidy target.
    ///
    /// Only value bytes are counted while walking. The entry that crosses the
    /// gap is evicted too. Expiry is ignored.
    fn tidy(&mut self) {
        if self.current_size <= self.tidy_target {
            return;
        }
        let bytes_to_delete = self.current_size - self.tidy_target;

        debug!(
            current_size = self.current_size,
            tidy_target = self.tidy_target,
            bytes_to_delete,
            "starting eviction sweep"
        );

        let mut content_bytes = 0;
        let mut victims = 0;
        for key in self.order.iter() {
            content_bytes += self.entries.get(key).map_or(0, CacheEntry::data_bytes);
            victims += 1;
            if content_bytes >= bytes_to_delete {
                break;
            }
        }

        // The victims are exactly the oldest `victims` keys
        let mut freed = 0;
        for _ in 0..victims {
            if let Some(key) = self.order.pop_oldest() {
                if let Some(entry) = self.entries.remove(&key) {
                    freed += entry.footprint();
                }
            }
        }

        if self.accounting == SizeAccounting::Reconciled {
            self.current_size = self.current_size.saturating_sub(freed);
        }

        self.stats.record_sweep(victims);
        info!(
            evicted = victims,
            freed_bytes = freed,
            remaining = self.entries.len(),
            current_size = self.current_size,
            "eviction sweep complete"
        );
    }

    // == Report Size ==
    /// Recomputes the estimated footprint from the live entries.
    pub fn report_size(&self) -> SizeReport {
        let (data, meta) = self
            .entries
            .values()
            .fold((0, 0), |(data, meta), entry| {
                (data + entry.data_bytes(), meta + entry.meta_bytes())
            });

        SizeReport::new(data, meta, MAP_BASELINE_BYTES)
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Accessors ==
    /// The running size estimate in bytes.
    pub fn current_size(&self) -> usize {
        self.current_size
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn trigger_threshold(&self) -> usize {
        self.trigger_threshold
    }

    pub fn tidy_target(&self) -> usize {
        self.tidy_target
    }

    pub fn default_ttl(&self) -> u64 {
        self.default_ttl
    }

    /// Keys from oldest to newest insertion, expired ones included.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Returns the current number of entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Integer floor of 80% of `bytes`, without overflowing.
fn four_fifths(bytes: usize) -> usize {
    bytes / 5 * 4 + (bytes % 5) * 4 / 5
}

impl Default for BoundedTtlCache {
    fn default() -> Self {
        Self::from_config(&CacheConfig::default())
    }
}
