//! Size Estimation Module
//!
//! Estimates the bytes held by the cache. Insert, sweep and report all use
//! these functions; the figures are consistent with each other, not with the
//! allocator.

use std::collections::{HashMap, VecDeque};
use std::mem::size_of;

use crate::cache::CacheEntry;

/// Fixed overhead charged to every stored value (the `String` header).
pub const VALUE_OVERHEAD_BYTES: usize = size_of::<String>();

/// Bytes charged for one expiry timestamp.
pub const EXPIRY_BYTES: usize = size_of::<u64>();

/// Baseline overhead of an empty ordered map: the key map plus the order queue.
pub const MAP_BASELINE_BYTES: usize =
    size_of::<HashMap<String, CacheEntry>>() + size_of::<VecDeque<String>>();

/// Estimated bytes held by a text value.
pub fn estimate_value(value: &str) -> usize {
    VALUE_OVERHEAD_BYTES + value.len()
}

/// Estimated bytes held by an expiry timestamp. Independent of its magnitude.
pub fn estimate_expiry(_expires_at: u64) -> usize {
    EXPIRY_BYTES
}
