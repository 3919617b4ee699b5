//! Size Report Module
//!
//! Structured breakdown of the estimated memory held by the cache.

use std::fmt;

use serde::Serialize;

// == Size Report ==
/// Estimated byte footprint, recomputed from the live entries.
///
/// Displays as a JSON object with `data`, `meta`, `dict` and `total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SizeReport {
    /// Bytes held by stored values
    pub data: usize,
    /// Bytes held by expiry metadata
    pub meta: usize,
    /// Baseline overhead of the map itself
    pub dict: usize,
    /// `data + meta + dict`
    pub total: usize,
}

impl SizeReport {
    /// Builds a report, deriving `total` from the parts.
    pub fn new(data: usize, meta: usize, dict: usize) -> Self {
        Self {
            data,
            meta,
            dict,
            total: data + meta + dict,
        }
    }
}

impl fmt::Display for SizeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
