//! Error types for MEMO operations
//!
//! Compute failures never appear here: a cache hands the error produced by
//! its compute callback back to the caller untouched. These enums cover the
//! cache's own surface (configuration loading and validation).

use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to parse configuration: {reason}")]
    Parse { reason: String },
}

/// Master error type for all MEMO errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MemoError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for MEMO operations.
pub type MemoResult<T> = Result<T, MemoError>;

// =============================================================================
// TESTS
// =============================================================================
