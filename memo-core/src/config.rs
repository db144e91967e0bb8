//! Configuration types

use crate::{ConfigError, MemoResult};
use serde::{Deserialize, Serialize};

/// Upper bound on `initial_capacity`.
///
/// Allocation failure aborts the process, so an absurd reservation is
/// rejected at validation time instead.
pub const MAX_INITIAL_CAPACITY: usize = 1 << 24;

/// Configuration for a single cache instance.
///
/// Every field has a default, so a TOML document may set any subset:
///
/// ```toml
/// name = "shader-programs"
/// initial_capacity = 64
/// record_stats = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheConfig {
    /// Name attached to every log event the cache emits.
    pub name: String,
    /// Number of entries to reserve room for at construction.
    pub initial_capacity: usize,
    /// Whether hit/miss/release counters are maintained.
    pub record_stats: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            name: "memo".to_string(),
            initial_capacity: 0,
            record_stats: true,
        }
    }
}

impl CacheConfig {
    /// Create a new cache config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cache name used in log events.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the initial capacity.
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Enable or disable statistics recording.
    pub fn with_stats(mut self, enabled: bool) -> Self {
        self.record_stats = enabled;
        self
    }

    /// Parse and validate a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> MemoResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration as TOML text.
    pub fn to_toml_string(&self) -> MemoResult<String> {
        toml::to_string(self).map_err(|e| {
            ConfigError::Parse {
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Validate the configuration.
    ///
    /// Validates:
    /// - name is not blank
    /// - initial_capacity <= MAX_INITIAL_CAPACITY
    pub fn validate(&self) -> MemoResult<()> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "name".to_string(),
                value: self.name.clone(),
                reason: "name must not be blank".to_string(),
            }
            .into());
        }

        if self.initial_capacity > MAX_INITIAL_CAPACITY {
            return Err(ConfigError::InvalidValue {
                field: "initial_capacity".to_string(),
                value: self.initial_capacity.to_string(),
                reason: format!("initial_capacity must be at most {}", MAX_INITIAL_CAPACITY),
            }
            .into());
        }

        Ok(())
    }
}
