//! Compute and release traits, plus closure adapters.
//!
//! These are the two seams a cache is built from: how a value is produced
//! on a miss, and what happens to a value when its entry is invalidated.

use std::fmt;

/// Produces the value for a key on a cache miss.
///
/// `compute` receives the cache's context by mutable reference and the key
/// being looked up. It may do arbitrary work and may fail; a failure is
/// handed back to the `get_or_fetch` caller unchanged and nothing is
/// stored.
///
/// # Implementation Requirements
///
/// - Must not assume it is called more than once per key; the cache only
///   calls it again after the key has been invalidated.
/// - Must not retain borrows of `key` past the call; the cache stores its
///   own copy of the key.
pub trait Compute<C> {
    /// The cached value type.
    type Value;
    /// The error reported when a value cannot be produced.
    type Error;

    /// Compute the value for `key`.
    fn compute(&mut self, context: &mut C, key: &str) -> Result<Self::Value, Self::Error>;
}

/// Disposes of a value whose entry was removed from the cache.
///
/// Called exactly once per stored value: on `invalidate`, `invalidate_all`,
/// `destroy`, or when the cache is dropped. Ownership of the value moves
/// into the call.
pub trait Release<C, V> {
    /// Release `value`.
    fn release(&mut self, context: &mut C, value: V);
}

/// Release hook for caches that have none: invalidated values are dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoRelease;

impl<C, V> Release<C, V> for NoRelease {
    fn release(&mut self, _context: &mut C, value: V) {
        drop(value);
    }
}

/// [`Compute`] implementation backed by a closure. See [`compute_fn`].
#[derive(Clone, Copy)]
pub struct ComputeFn<F> {
    f: F,
}

/// Wrap a closure as a [`Compute`] implementation.
///
/// ```
/// use memo_cache::{compute_fn, Cache};
///
/// let mut cache = Cache::new((), compute_fn(|_: &mut (), key: &str| {
///     Ok::<_, std::num::ParseIntError>(key.parse::<u32>()? * 2)
/// }));
/// assert_eq!(cache.get_or_fetch("21"), Ok(&42));
/// assert!(cache.get_or_fetch("nope").is_err());
/// ```
pub fn compute_fn<C, V, E, F>(f: F) -> ComputeFn<F>
where
    F: FnMut(&mut C, &str) -> Result<V, E>,
{
    ComputeFn { f }
}

impl<C, V, E, F> Compute<C> for ComputeFn<F>
where
    F: FnMut(&mut C, &str) -> Result<V, E>,
{
    type Value = V;
    type Error = E;

    fn compute(&mut self, context: &mut C, key: &str) -> Result<V, E> {
        (self.f)(context, key)
    }
}

impl<F> fmt::Debug for ComputeFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComputeFn").finish_non_exhaustive()
    }
}

/// [`Release`] implementation backed by a closure. See [`release_fn`].
#[derive(Clone, Copy)]
pub struct ReleaseFn<F> {
    f: F,
}

/// Wrap a closure as a [`Release`] implementation.
pub fn release_fn<C, V, F>(f: F) -> ReleaseFn<F>
where
    F: FnMut(&mut C, V),
{
    ReleaseFn { f }
}

impl<C, V, F> Release<C, V> for ReleaseFn<F>
where
    F: FnMut(&mut C, V),
{
    fn release(&mut self, context: &mut C, value: V) {
        (self.f)(context, value)
    }
}

impl<F> fmt::Debug for ReleaseFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReleaseFn").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_fn_forwards_context_and_key() {
        let mut compute = compute_fn(|seen: &mut Vec<String>, key: &str| {
            seen.push(key.to_string());
            Ok::<_, ()>(key.len())
        });
        let mut seen = Vec::new();

        assert_eq!(compute.compute(&mut seen, "four"), Ok(4));
        assert_eq!(seen, vec!["four".to_string()]);
    }

    #[test]
    fn test_release_fn_receives_value() {
        let mut release = release_fn(|total: &mut u32, value: u32| *total += value);
        let mut total = 0;

        release.release(&mut total, 5);
        release.release(&mut total, 7);
        assert_eq!(total, 12);
    }

    #[test]
    fn test_no_release_drops_value() {
        let value = std::rc::Rc::new(());
        let mut release = NoRelease;

        release.release(&mut (), value.clone());
        assert_eq!(std::rc::Rc::strong_count(&value), 1);
    }
}
