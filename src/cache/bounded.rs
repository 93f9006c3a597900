//! Bounded Key Cache Module
//!
//! Thread-safe handle over [`CacheStore`]. A single mutex guards the
//! insertion order, the index and the counters as one unit, so every
//! operation is linearizable.

use std::borrow::Borrow;
use std::hash::Hash;

use parking_lot::Mutex;
use tracing::debug;

use crate::cache::{CacheStats, CacheStore, Observation};
use crate::error::Result;

// == Bounded Key Cache ==
/// Fixed-capacity key-value cache with FIFO eviction, safe to share
/// between tasks behind an `Arc`.
///
/// The lock is taken and released inside each method; no guard ever
/// escapes to the caller. `parking_lot` mutexes do not poison, so a panic
/// in a caller cannot wedge the cache.
#[derive(Debug)]
pub struct BoundedKeyCache<K, V> {
    inner: Mutex<CacheStore<K, V>>,
}

impl<K, V> BoundedKeyCache<K, V>
where
    K: Hash + Eq + Clone + std::fmt::Debug,
    V: Clone,
{
    // == Constructor ==
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Errors
    /// `AuditError::InvalidConfig` when `capacity` is zero or above
    /// [`MAX_CAPACITY`](crate::cache::MAX_CAPACITY).
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self {
            inner: Mutex::new(CacheStore::new(capacity)?),
        })
    }

    // == Observe ==
    /// Stores `value` under `key`. See [`CacheStore::observe`].
    pub fn observe(&self, key: K, value: V) -> Observation<K> {
        let outcome = self.inner.lock().observe(key, value);
        if let Some(evicted) = outcome.evicted() {
            debug!(?evicted, "evicted oldest cache entry");
        }
        outcome
    }

    // == Lookup ==
    /// Returns a copy of the cached value, or `None` on a miss.
    pub fn lookup<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().lookup(key)
    }

    // == Update ==
    /// Mutates a cached value in place and returns the value it replaced.
    ///
    /// The mutator runs while the lock is held and must not call back into
    /// this cache.
    pub fn update<Q, F>(&self, key: &Q, mutator: F) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        F: FnOnce(&mut V),
    {
        self.inner.lock().update(key, mutator)
    }

    // == Contains ==
    /// Checks whether a key is cached without touching the hit/miss counters.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().contains(key)
    }

    // == Keys ==
    /// Cached keys from oldest to newest.
    pub fn keys(&self) -> Vec<K> {
        self.inner.lock().keys()
    }

    // == Stats ==
    /// Returns a copy of the activity counters.
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    // == Length ==
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    // == Capacity ==
    /// Returns the maximum number of cached entries.
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        self.inner.lock().is_consistent()
    }
}
