//! Cache Entry Module
//!
//! Defines a stored text value paired with its absolute expiry.

use crate::cache::size;

// == Cache Entry ==
/// A single cached value and the Unix second after which it is stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// The stored text
    pub value: String,
    /// Expiration timestamp (Unix seconds)
    pub expires_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry expiring `ttl_seconds` after `now`.
    ///
    /// # Arguments
    /// * `value` - The text to store
    /// * `now` - Current Unix time in seconds
    /// * `ttl_seconds` - Lifetime in seconds
    pub fn new(value: String, now: u64, ttl_seconds: u64) -> Self {
        Self {
            value,
            expires_at: now.saturating_add(ttl_seconds),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// Boundary condition: an entry is still valid during its expiry second
    /// and only expires once `now` is strictly greater than `expires_at`.
    pub fn is_expired(&self, now: u64) -> bool {
        now > self.expires_at
    }

    // == Size Contributions ==
    /// Estimated bytes held by the value.
    pub fn data_bytes(&self) -> usize {
        size::estimate_value(&self.value)
    }

    /// Estimated bytes held by the expiry metadata.
    pub fn meta_bytes(&self) -> usize {
        size::estimate_expiry(self.expires_at)
    }

    /// Value and metadata bytes together, as added to the running estimate.
    pub fn footprint(&self) -> usize {
        self.data_bytes() + self.meta_bytes()
    }
}
