//! MEMO Cache - Keyed Compute-on-Miss Cache
//!
//! A single-owner, string-keyed cache that computes values lazily through a
//! pluggable hook and releases them through another. Configuration and
//! error types live in memo-core and are re-exported here.

pub mod cache;

pub use cache::{
    compute_fn, release_fn, Cache, CacheStats, Compute, ComputeFn, NoRelease, Release, ReleaseFn,
};

pub use memo_core::{CacheConfig, ConfigError, MemoError, MemoResult};
