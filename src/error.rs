//! Error types for cache configuration
//!
//! Cache operations themselves are total; only parsing configuration can fail.

use thiserror::Error;

// == Config Error Enum ==
/// Errors raised while reading cache configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Size accounting mode not recognised
    #[error("Unknown size accounting mode: {0}")]
    UnknownAccounting(String),
}

// == Result Type Alias ==
/// Convenience Result type for configuration parsing.
pub type Result<T> = std::result::Result<T, ConfigError>;
