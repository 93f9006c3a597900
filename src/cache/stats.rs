//! Cache Statistics Module
//!
//! Tracks snapshot cache activity: lookup hits and misses, evictions,
//! overwrites and in-place updates.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache activity counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Lookups that found a snapshot
    pub hits: u64,
    /// Lookups for a message that was never cached or already evicted
    pub misses: u64,
    /// Snapshots dropped to make room under FIFO order
    pub evictions: u64,
    /// Observations that replaced an existing snapshot in place
    pub overwrites: u64,
    /// Updates applied to a cached snapshot
    pub updates: u64,
    /// Updates ignored because the message was not cached
    pub update_misses: u64,
    /// Current number of cached snapshots
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the lookup hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_overwrite(&mut self) {
        self.overwrites += 1;
    }

    pub fn record_update(&mut self) {
        self.updates += 1;
    }

    pub fn record_update_miss(&mut self) {
        self.update_misses += 1;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
