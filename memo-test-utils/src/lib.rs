//! MEMO Test Utilities
//!
//! Shared test infrastructure for the MEMO workspace:
//! - A recording context and mock compute/release hooks
//! - Proptest generators for keys and cache operations
//! - Tracing setup for tests

pub use memo_cache::{Cache, CacheConfig, CacheStats, Compute, Release};

use proptest::prelude::*;
use std::collections::HashSet;
use thiserror::Error;

// ============================================================================
// RECORDING CONTEXT
// ============================================================================

/// Context that records every compute and release call it witnesses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallLedger {
    /// Keys passed to compute, in call order (including failed calls).
    pub computed: Vec<String>,
    /// Values passed to release, in call order.
    pub released: Vec<String>,
    /// Keys compute must refuse.
    pub refused: HashSet<String>,
}

impl CallLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger whose compute refuses the given keys.
    pub fn refusing<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            refused: keys.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Number of compute calls made for `key`.
    pub fn compute_count(&self, key: &str) -> usize {
        self.computed.iter().filter(|k| k.as_str() == key).count()
    }

    /// Number of times `value` was released.
    pub fn release_count(&self, value: &str) -> usize {
        self.released.iter().filter(|v| v.as_str() == value).count()
    }
}

// ============================================================================
// MOCK HOOKS
// ============================================================================

/// Error returned by [`UppercaseCompute`] for refused keys.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MockComputeError {
    #[error("compute refused key {key}")]
    Refused { key: String },
}

/// Compute hook producing `key.to_uppercase()`, or an error for keys the
/// ledger refuses.
#[derive(Debug, Clone, Copy, Default)]
pub struct UppercaseCompute;

impl Compute<CallLedger> for UppercaseCompute {
    type Value = String;
    type Error = MockComputeError;

    fn compute(&mut self, ledger: &mut CallLedger, key: &str) -> Result<String, MockComputeError> {
        ledger.computed.push(key.to_string());
        if ledger.refused.contains(key) {
            return Err(MockComputeError::Refused {
                key: key.to_string(),
            });
        }
        Ok(key.to_uppercase())
    }
}

/// Release hook appending each value to the ledger.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordingRelease;

impl Release<CallLedger, String> for RecordingRelease {
    fn release(&mut self, ledger: &mut CallLedger, value: String) {
        ledger.released.push(value);
    }
}

/// The cache most tests want: uppercase compute, recorded releases.
pub type RecordingCache = Cache<CallLedger, UppercaseCompute, RecordingRelease>;

/// Build a [`RecordingCache`] around `ledger`.
pub fn recording_cache(ledger: CallLedger) -> RecordingCache {
    Cache::with_release(ledger, UppercaseCompute, RecordingRelease)
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

/// One operation against a cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheOp {
    GetOrFetch(String),
    Lookup(String),
    Invalidate(String),
    InvalidateAll,
}

/// Short lowercase keys, so generated operations collide often.
pub fn arb_key() -> impl Strategy<Value = String> {
    "[a-e]{1,2}"
}

pub fn arb_cache_op() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        4 => arb_key().prop_map(CacheOp::GetOrFetch),
        2 => arb_key().prop_map(CacheOp::Lookup),
        2 => arb_key().prop_map(CacheOp::Invalidate),
        1 => Just(CacheOp::InvalidateAll),
    ]
}

pub fn arb_cache_ops(max_len: usize) -> impl Strategy<Value = Vec<CacheOp>> {
    prop::collection::vec(arb_cache_op(), 0..max_len)
}

// ============================================================================
// TRACING
// ============================================================================

/// Install a test-friendly tracing subscriber honouring `RUST_LOG`.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_counts() {
        let mut ledger = CallLedger::refusing(["bad"]);
        let mut compute = UppercaseCompute;

        assert_eq!(compute.compute(&mut ledger, "ok"), Ok("OK".to_string()));
        assert_eq!(
            compute.compute(&mut ledger, "bad"),
            Err(MockComputeError::Refused {
                key: "bad".to_string()
            })
        );
        assert_eq!(ledger.compute_count("ok"), 1);
        assert_eq!(ledger.compute_count("bad"), 1);
    }

    #[test]
    fn test_recording_release() {
        let mut ledger = CallLedger::new();
        RecordingRelease.release(&mut ledger, "A".to_string());
        assert_eq!(ledger.release_count("A"), 1);
    }

    #[test]
    fn test_mock_error_display() {
        let err = MockComputeError::Refused {
            key: "x".to_string(),
        };
        assert_eq!(err.to_string(), "compute refused key x");
    }
}
