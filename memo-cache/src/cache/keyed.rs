//! String-keyed compute-on-miss cache.
//!
//! A [`Cache`] owns its entries, its compute and release hooks, and the
//! context it was given. The context goes back to the caller on
//! [`Cache::destroy`].

use std::fmt;

use hashbrown::hash_map::EntryRef;
use hashbrown::HashMap;
use memo_core::{CacheConfig, MemoResult};

use super::stats::CacheStats;
use super::traits::{Compute, NoRelease, Release};

const CONTEXT_LENT: &str = "context is only taken by destroy";

/// Keyed, lazily-populated value cache.
///
/// # Type Parameters
///
/// - `C`: The context lent to every compute/release call
/// - `F`: The compute hook, invoked on a key miss
/// - `R`: The release hook, invoked once per invalidated value
///
/// Values still stored when the cache is dropped are released as if
/// [`Cache::invalidate_all`] had been called.
///
/// # Example
///
/// ```
/// use memo_cache::{compute_fn, release_fn, Cache};
///
/// let mut cache = Cache::with_release(
///     Vec::new(),
///     compute_fn(|_: &mut Vec<String>, key: &str| Ok::<_, ()>(key.to_uppercase())),
///     release_fn(|released: &mut Vec<String>, value: String| released.push(value)),
/// );
///
/// assert_eq!(cache.get_or_fetch("abc").map(String::as_str), Ok("ABC"));
/// assert!(cache.invalidate("abc"));
/// assert_eq!(cache.get("abc"), None);
///
/// let released = cache.destroy();
/// assert_eq!(released, vec!["ABC".to_string()]);
/// ```
pub struct Cache<C, F, R = NoRelease>
where
    F: Compute<C>,
    R: Release<C, F::Value>,
{
    /// Caller-owned context; `None` only once `destroy` has taken it back.
    context: Option<C>,
    /// Produces values on a miss.
    compute: F,
    /// Disposes of invalidated values.
    release: R,
    /// Stored values by key.
    entries: HashMap<String, F::Value>,
    /// Cache configuration.
    config: CacheConfig,
    /// Usage counters; only updated when `config.record_stats` is set.
    stats: CacheStats,
}

fn lent<C>(context: &mut Option<C>) -> &mut C {
    context.as_mut().expect(CONTEXT_LENT)
}

impl<C, F> Cache<C, F, NoRelease>
where
    F: Compute<C>,
{
    /// Create an empty cache whose invalidated values are simply dropped.
    pub fn new(context: C, compute: F) -> Self {
        Self::with_release(context, compute, NoRelease)
    }
}

impl<C, F, R> Cache<C, F, R>
where
    F: Compute<C>,
    R: Release<C, F::Value>,
{
    /// Create an empty cache with a release hook.
    ///
    /// Nothing is computed until the first `get_or_fetch`.
    pub fn with_release(context: C, compute: F, release: R) -> Self {
        Self {
            context: Some(context),
            compute,
            release,
            entries: HashMap::new(),
            config: CacheConfig::default(),
            stats: CacheStats::default(),
        }
    }

    /// Apply a configuration, reserving room for `initial_capacity` entries.
    pub fn with_config(mut self, config: CacheConfig) -> MemoResult<Self> {
        config.validate()?;
        self.entries
            .reserve(config.initial_capacity.saturating_sub(self.entries.len()));
        self.config = config;
        Ok(self)
    }

    /// Get the cache configuration.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Borrow the context.
    pub fn context(&self) -> &C {
        self.context.as_ref().expect(CONTEXT_LENT)
    }

    /// Mutably borrow the context.
    ///
    /// The cache never reads the context itself; this lets its owner adjust
    /// state that compute or release depend on between calls.
    pub fn context_mut(&mut self) -> &mut C {
        lent(&mut self.context)
    }

    /// Look up the stored value for `key` without computing anything.
    pub fn get(&self, key: &str) -> Option<&F::Value> {
        self.entries.get(key)
    }

    /// Returns true if `key` has a stored value.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Get the stored value for `key`, computing and storing it on a miss.
    ///
    /// On a hit compute is not invoked. On a miss compute runs once; if it
    /// succeeds the value is stored under a copy of `key`, and if it fails
    /// the error is returned unchanged and the cache is left exactly as it
    /// was, so a later call will compute again.
    pub fn get_or_fetch(&mut self, key: &str) -> Result<&F::Value, F::Error> {
        match self.entries.entry_ref(key) {
            EntryRef::Occupied(entry) => {
                if self.config.record_stats {
                    self.stats.hits += 1;
                }
                tracing::trace!(cache = %self.config.name, key, "cache hit");
                Ok(&*entry.into_mut())
            }
            EntryRef::Vacant(entry) => {
                if self.config.record_stats {
                    self.stats.misses += 1;
                }
                tracing::debug!(cache = %self.config.name, key, "cache miss, computing value");

                match self.compute.compute(lent(&mut self.context), key) {
                    // The key is only copied here, once the value exists.
                    Ok(value) => Ok(&*entry.insert(value)),
                    Err(err) => {
                        if self.config.record_stats {
                            self.stats.compute_failures += 1;
                        }
                        tracing::debug!(cache = %self.config.name, key, "compute failed, nothing stored");
                        Err(err)
                    }
                }
            }
        }
    }

    /// Remove the entry for `key`, handing its value to the release hook.
    ///
    /// Returns false, without calling release, if `key` has no entry.
    pub fn invalidate(&mut self, key: &str) -> bool {
        let Some(value) = self.entries.remove(key) else {
            return false;
        };

        self.release.release(lent(&mut self.context), value);
        if self.config.record_stats {
            self.stats.releases += 1;
        }
        tracing::debug!(cache = %self.config.name, key, "entry invalidated");
        true
    }

    /// Remove every entry, releasing each value once, in unspecified order.
    ///
    /// The cache stays usable afterwards. Returns the number of entries
    /// released.
    pub fn invalidate_all(&mut self) -> usize {
        let Some(context) = self.context.as_mut() else {
            return 0;
        };

        let mut released = 0usize;
        for (_key, value) in self.entries.drain() {
            self.release.release(context, value);
            released += 1;
        }

        if self.config.record_stats {
            self.stats.releases += released as u64;
        }
        if released > 0 {
            tracing::debug!(cache = %self.config.name, released, "all entries invalidated");
        }
        released
    }

    /// Tear the cache down and return its context.
    ///
    /// Every remaining value is released first.
    pub fn destroy(mut self) -> C {
        let released = self.invalidate_all();
        tracing::debug!(cache = %self.config.name, released, "cache destroyed");
        self.context.take().expect(CONTEXT_LENT)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over stored keys in unspecified order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// Iterate over stored key/value pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &F::Value)> + '_ {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Snapshot of the usage counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entry_count: self.entries.len() as u64,
            ..self.stats.clone()
        }
    }

    /// Zero the usage counters.
    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::default();
    }
}

impl<C, F, R> Drop for Cache<C, F, R>
where
    F: Compute<C>,
    R: Release<C, F::Value>,
{
    fn drop(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let released = self.invalidate_all();
        tracing::debug!(cache = %self.config.name, released, "cache dropped, entries released");
    }
}

impl<C, F, R> fmt::Debug for Cache<C, F, R>
where
    F: Compute<C>,
    R: Release<C, F::Value>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("name", &self.config.name)
            .field("len", &self.entries.len())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
