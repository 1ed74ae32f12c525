//! Cache statistics and counters.

use std::sync::atomic::{AtomicU64, Ordering};

/// Statistics for equivalence-cache operations.
///
/// All counters are atomic and can be safely accessed from multiple
/// threads.
#[derive(Debug, Default)]
pub struct CacheStats {
    /// Number of lookups served from the cache.
    hits: AtomicU64,
    /// Number of lookups that fell through to the predicate.
    misses: AtomicU64,
    /// Number of results written to the cache.
    updates: AtomicU64,
    /// Number of writes dropped because the snapshot was stale.
    stale_skips: AtomicU64,
    /// Number of invalidation calls that removed entries.
    invalidations: AtomicU64,
}

impl CacheStats {
    /// Create new cache statistics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a cache hit.
    #[inline]
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a cache miss.
    #[inline]
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a result written to the cache.
    #[inline]
    pub fn record_update(&self) {
        self.updates.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a write dropped by the freshness check.
    #[inline]
    pub fn record_stale_skip(&self) {
        self.stale_skips.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an invalidation.
    #[inline]
    pub fn record_invalidation(&self) {
        self.invalidations.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total cache hits.
    #[inline]
    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Get total cache misses.
    #[inline]
    #[must_use]
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Get total results written.
    #[inline]
    #[must_use]
    pub fn updates(&self) -> u64 {
        self.updates.load(Ordering::Relaxed)
    }

    /// Get total writes dropped as stale.
    #[inline]
    #[must_use]
    pub fn stale_skips(&self) -> u64 {
        self.stale_skips.load(Ordering::Relaxed)
    }

    /// Get total invalidations.
    #[inline]
    #[must_use]
    pub fn invalidations(&self) -> u64 {
        self.invalidations.load(Ordering::Relaxed)
    }

    /// Calculate hit rate (0.0 to 1.0).
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits() as f64;
        let total = hits + self.misses() as f64;
        if total == 0.0 {
            0.0
        } else {
            hits / total
        }
    }

    /// Reset all statistics.
    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.updates.store(0, Ordering::Relaxed);
        self.stale_skips.store(0, Ordering::Relaxed);
        self.invalidations.store(0, Ordering::Relaxed);
    }
}
