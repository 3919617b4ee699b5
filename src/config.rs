//! Configuration Module
//!
//! Cache sizing and size-accounting options supplied by the embedding caller.

use std::str::FromStr;

use serde::Deserialize;

use crate::error::ConfigError;

/// Default cache ceiling in kilobytes.
pub const DEFAULT_MAX_SIZE_KB: usize = 100;

/// Default time-to-live in seconds.
pub const DEFAULT_TTL_SECONDS: u64 = 3600;

// == Size Accounting ==
/// How the running size estimate reacts to removals and overwrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeAccounting {
    /// The estimate only grows on `set`. Overwrites add on top of the old
    /// contribution, and neither lazy expiry nor sweeps lower it.
    #[default]
    Legacy,
    /// Overwrites, lazy expiry and sweeps subtract what they replace or remove.
    Reconciled,
}

impl FromStr for SizeAccounting {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(Self::Legacy),
            "reconciled" => Ok(Self::Reconciled),
            other => Err(ConfigError::UnknownAccounting(other.to_string())),
        }
    }
}

// == Cache Config ==
/// Parameters for constructing a `BoundedTtlCache`.
///
/// Deserializable so callers can embed it in their own configuration; any
/// missing field falls back to its default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Soft memory ceiling in kilobytes
    pub max_size_kb: usize,
    /// TTL in seconds used by `set`
    pub default_ttl: u64,
    /// Size estimate bookkeeping mode
    pub size_accounting: SizeAccounting,
}

impl CacheConfig {
    /// Config with the given ceiling and default TTL and accounting.
    pub fn with_max_size_kb(max_size_kb: usize) -> Self {
        Self {
            max_size_kb,
            ..Self::default()
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_size_kb: DEFAULT_MAX_SIZE_KB,
            default_ttl: DEFAULT_TTL_SECONDS,
            size_accounting: SizeAccounting::Legacy,
        }
    }
}
