//! Keyed compute-on-miss cache.
//!
//! A [`Cache`] maps string keys to values produced by a caller-supplied
//! [`Compute`] hook. Values are computed on the first `get_or_fetch` for a
//! key and reused until the key is invalidated.
//!
//! # Ownership
//!
//! The cache owns every value it stores. Removing an entry moves the value
//! into the [`Release`] hook exactly once, whether the removal comes from
//! [`Cache::invalidate`], [`Cache::invalidate_all`], [`Cache::destroy`] or
//! dropping the cache.
//! The context handed to [`Cache::new`] is lent to both hooks and returned
//! by `destroy`.
//!
//! # Failure
//!
//! A compute error is returned to the caller as-is and leaves no entry
//! behind, so retrying simply computes again:
//!
//! ```
//! use memo_cache::{compute_fn, Cache};
//!
//! let mut cache = Cache::new(0u32, compute_fn(|attempts: &mut u32, key: &str| {
//!     *attempts += 1;
//!     if *attempts < 2 {
//!         Err("not yet")
//!     } else {
//!         Ok(key.len())
//!     }
//! }));
//!
//! assert_eq!(cache.get_or_fetch("four"), Err("not yet"));
//! assert_eq!(cache.get("four"), None);
//! assert_eq!(cache.get_or_fetch("four"), Ok(&4));
//! assert_eq!(cache.destroy(), 2);
//! ```

pub mod keyed;
pub mod stats;
pub mod traits;

pub use keyed::Cache;
pub use stats::CacheStats;
pub use traits::{compute_fn, release_fn, Compute, ComputeFn, NoRelease, Release, ReleaseFn};
