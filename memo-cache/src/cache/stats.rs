//! Cache statistics.

/// Statistics about cache usage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of `get_or_fetch` calls answered from a stored entry.
    pub hits: u64,
    /// Number of `get_or_fetch` calls that invoked compute.
    pub misses: u64,
    /// Number of compute calls that returned an error.
    pub compute_failures: u64,
    /// Number of values handed to the release hook.
    pub releases: u64,
    /// Number of entries currently in cache.
    pub entry_count: u64,
}

impl CacheStats {
    /// Total `get_or_fetch` calls observed.
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    /// Share of `get_or_fetch` calls served without computing, or 0.0 before
    /// the first call. Failed computes count as misses.
    pub fn hit_rate(&self) -> f64 {
        match self.lookups() {
            0 => 0.0,
            lookups => self.hits as f64 / lookups as f64,
        }
    }
}
