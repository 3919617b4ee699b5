//! Text Cache - An in-process cache for slow-changing text
//!
//! Keeps text values in memory with per-entry TTL, under a soft size ceiling
//! enforced by oldest-first eviction sweeps. Callers embed a
//! [`BoundedTtlCache`] directly, or share one across threads through
//! [`SharedCache`].

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{BoundedTtlCache, SharedCache, SizeReport};
pub use config::{CacheConfig, SizeAccounting};
pub use error::ConfigError;
