//! Cache Module
//!
//! Provides an in-memory text cache with per-entry TTL and a soft size
//! ceiling enforced by oldest-first eviction sweeps.

mod clock;
mod entry;
mod order;
mod report;
mod shared;
pub mod size;
mod stats;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub(crate) use order::InsertionOrder;
pub use report::SizeReport;
pub use shared::SharedCache;
pub use stats::CacheStats;
pub use store::BoundedTtlCache;
