//! Integration Tests for the Cache API
//!
//! Drives the public surface end to end: writes, reads, expiry, sweeps and
//! size reports, on a single cache and through a shared handle.

use std::thread;

use text_cache::cache::size::{EXPIRY_BYTES, MAP_BASELINE_BYTES, VALUE_OVERHEAD_BYTES};
use text_cache::cache::ManualClock;
use text_cache::{BoundedTtlCache, CacheConfig, SharedCache, SizeAccounting};

// == Helper Functions ==

const START: u64 = 1_700_000_000;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn create_test_cache(max_size_kb: usize, accounting: SizeAccounting) -> (BoundedTtlCache, ManualClock) {
    init_tracing();
    let clock = ManualClock::new(START);
    let config = CacheConfig {
        max_size_kb,
        size_accounting: accounting,
        ..CacheConfig::default()
    };
    (BoundedTtlCache::with_clock(&config, clock.clone()), clock)
}

fn value_with_footprint(bytes: usize) -> String {
    "x".repeat(bytes - VALUE_OVERHEAD_BYTES - EXPIRY_BYTES)
}

// == Read / Write ==

#[test]
fn test_write_then_read() {
    let (mut cache, _clock) = create_test_cache(100, SizeAccounting::Legacy);

    cache.set("greeting", "hello");

    assert_eq!(cache.get("greeting"), Some("hello".to_string()));
    assert_eq!(cache.get("missing"), None);
}

#[test]
fn test_overwrite_reads_latest_value() {
    let (mut cache, _clock) = create_test_cache(100, SizeAccounting::Legacy);

    cache.set("k", "v1");
    cache.set("k", "v2");

    assert_eq!(cache.get("k"), Some("v2".to_string()));
    assert_eq!(cache.len(), 1);
}

// == Expiry ==

#[test]
fn test_one_second_ttl_gone_after_two_seconds() {
    let (mut cache, clock) = create_test_cache(100, SizeAccounting::Legacy);

    cache.set_with_ttl("k", "v", 1);
    clock.advance(1);
    assert_eq!(cache.get("k"), Some("v".to_string()));

    clock.advance(1);
    assert_eq!(cache.get("k"), None);
    assert!(cache.is_empty());

    let stats = cache.stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.expirations, 1);
}

#[test]
fn test_default_ttl_holds_for_an_hour() {
    let (mut cache, clock) = create_test_cache(100, SizeAccounting::Legacy);

    cache.set("k", "v");
    clock.advance(3600);
    assert_eq!(cache.get("k"), Some("v".to_string()));

    clock.advance(1);
    assert_eq!(cache.get("k"), None);
}

// == Eviction ==

#[test]
fn test_third_write_sweeps_oldest() {
    let (mut cache, _clock) = create_test_cache(1, SizeAccounting::Legacy);
    let value = value_with_footprint((cache.trigger_threshold() - MAP_BASELINE_BYTES) / 2);

    cache.set("a", value.clone());
    cache.set("b", value.clone());
    cache.set("c", value.clone());

    assert_eq!(cache.get("a"), None);
    assert_eq!(cache.get("c"), Some(value));
    assert_eq!(cache.stats().sweeps, 1);
}

#[test]
fn test_reconciled_sweep_stays_under_trigger() {
    let (mut cache, _clock) = create_test_cache(1, SizeAccounting::Reconciled);

    for i in 0..50 {
        cache.set(format!("key_{}", i), "y".repeat(60));
        assert!(cache.current_size() <= cache.trigger_threshold());
    }

    assert_eq!(cache.get("key_49"), Some("y".repeat(60)));
    assert_eq!(cache.get("key_0"), None);
    assert_eq!(cache.current_size(), cache.report_size().total);
}

// == Size Report ==

#[test]
fn test_empty_report_is_baseline() {
    let (cache, _clock) = create_test_cache(100, SizeAccounting::Legacy);

    let report = cache.report_size();

    assert_eq!(report.data, 0);
    assert_eq!(report.meta, 0);
    assert_eq!(report.dict, MAP_BASELINE_BYTES);
    assert_eq!(report.total, MAP_BASELINE_BYTES);
}

#[test]
fn test_report_renders_as_json() {
    let (mut cache, _clock) = create_test_cache(100, SizeAccounting::Legacy);
    cache.set("k", "abc");

    let json: serde_json::Value = serde_json::from_str(&cache.report_size().to_string()).unwrap();

    assert_eq!(json["data"], VALUE_OVERHEAD_BYTES + 3);
    assert_eq!(json["meta"], EXPIRY_BYTES);
    assert_eq!(json["total"], VALUE_OVERHEAD_BYTES + 3 + EXPIRY_BYTES + MAP_BASELINE_BYTES);
}

// == Shared Access ==

#[test]
fn test_shared_cache_across_threads() {
    init_tracing();
    let cache = SharedCache::from_config(&CacheConfig::with_max_size_kb(1));

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let cache = cache.clone();
            thread::spawn(move || {
                for i in 0..50 {
                    cache.set(format!("t{}_{}", t, i), format!("value_{}", i));
                    let _ = cache.get(&format!("t{}_{}", t, i / 2));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let report = cache.report_size();
    assert_eq!(report.total, report.data + report.meta + report.dict);

    let stats = cache.stats();
    assert_eq!(stats.hits + stats.misses, 400);
    assert!(stats.sweeps > 0);
    assert!(cache.with_cache(|inner| inner.len()) < 400);
}
