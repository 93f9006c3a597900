//! Cache Store Module
//!
//! Single-threaded cache engine combining HashMap storage with FIFO
//! insertion-order tracking. Thread safety is layered on top by
//! [`BoundedKeyCache`](crate::cache::BoundedKeyCache).

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use crate::cache::{CacheStats, FifoRing, MAX_CAPACITY};
use crate::error::{AuditError, Result};

// == Observation ==
/// What an `observe` call did to the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation<K> {
    /// New key stored in a free slot
    Inserted,
    /// Existing key overwritten in place; eviction position unchanged
    Replaced,
    /// New key stored after evicting the oldest key
    Evicted(K),
}

impl<K> Observation<K> {
    /// Returns the evicted key, if any.
    pub fn evicted(&self) -> Option<&K> {
        match self {
            Observation::Evicted(key) => Some(key),
            _ => None,
        }
    }
}

// == Cache Store ==
/// Bounded key-value storage with FIFO eviction.
///
/// Invariants held between calls:
/// - `index` and `order` contain exactly the same keys
/// - `order` never exceeds `capacity` and never repeats a key
#[derive(Debug)]
pub struct CacheStore<K, V> {
    /// Key-value storage
    index: HashMap<K, V>,
    /// Insertion order, oldest first
    order: FifoRing<K>,
    /// Activity counters
    stats: CacheStats,
}

impl<K, V> CacheStore<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates a new CacheStore holding at most `capacity` entries.
    ///
    /// Only the ring is allocated up front; the index grows as snapshots
    /// arrive.
    ///
    /// # Errors
    /// `AuditError::InvalidConfig` when `capacity` is zero or above
    /// [`MAX_CAPACITY`].
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(AuditError::InvalidConfig(
                "cache capacity must be greater than zero".to_string(),
            ));
        }
        if capacity > MAX_CAPACITY {
            return Err(AuditError::InvalidConfig(format!(
                "cache capacity must not exceed {}",
                MAX_CAPACITY
            )));
        }

        Ok(Self {
            index: HashMap::new(),
            order: FifoRing::with_capacity(capacity),
            stats: CacheStats::new(),
        })
    }

    // == Observe ==
    /// Stores the latest snapshot for a key.
    ///
    /// An existing key is overwritten in place without moving in the
    /// eviction order. A new key is appended; if the cache is full, the
    /// oldest inserted key is evicted first. Eviction is never an error.
    pub fn observe(&mut self, key: K, value: V) -> Observation<K> {
        if let Some(current) = self.index.get_mut(&key) {
            *current = value;
            self.stats.record_overwrite();
            return Observation::Replaced;
        }

        let evicted = self.order.push(key.clone());
        if let Some(old_key) = &evicted {
            self.index.remove(old_key);
            self.stats.record_eviction();
        }
        self.index.insert(key, value);
        self.stats.set_total_entries(self.index.len());

        match evicted {
            Some(old_key) => Observation::Evicted(old_key),
            None => Observation::Inserted,
        }
    }

    // == Lookup ==
    /// Returns a copy of the stored value.
    ///
    /// Never touches the eviction order. Only the hit/miss counters change.
    pub fn lookup<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.index.get(key) {
            Some(value) => {
                self.stats.record_hit();
                Some(value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Update ==
    /// Applies `mutator` to a cached value and returns the previous value.
    ///
    /// The mutator works on a copy which is swapped in only once it returns,
    /// so a panicking mutator leaves the stored value untouched. Absent keys
    /// return `None` and leave `index` and `order` as they were.
    pub fn update<Q, F>(&mut self, key: &Q, mutator: F) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        F: FnOnce(&mut V),
    {
        let Some(current) = self.index.get_mut(key) else {
            self.stats.record_update_miss();
            return None;
        };

        let mut next = current.clone();
        mutator(&mut next);
        let previous = std::mem::replace(current, next);
        self.stats.record_update();
        Some(previous)
    }

    // == Contains ==
    /// Checks whether a key is cached without touching the hit/miss counters.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    // == Keys ==
    /// Returns cached keys from oldest to newest.
    pub fn keys(&self) -> Vec<K> {
        self.order.iter().cloned().collect()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.index.len());
        stats
    }

    // == Length ==
    /// Returns the number of cached entries.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    // == Capacity ==
    /// Returns the maximum number of cached entries.
    pub fn capacity(&self) -> usize {
        self.order.capacity()
    }

    /// Checks that `index` and `order` describe the same key set.
    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        let keys = self.keys();
        let unique: std::collections::HashSet<&K> = keys.iter().collect();

        keys.len() == self.index.len()
            && unique.len() == keys.len()
            && keys.len() <= self.capacity()
            && keys.iter().all(|key| self.index.contains_key(key))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn store(capacity: usize) -> CacheStore<String, String> {
        CacheStore::new(capacity).unwrap()
    }

    #[test]
    fn test_store_new() {
        let store = store(100);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.capacity(), 100);
    }

    #[test]
    fn test_store_rejects_zero_capacity() {
        let result = CacheStore::<String, String>::new(0);
        assert!(matches!(result, Err(AuditError::InvalidConfig(_))));
    }

    #[test]
    fn test_store_rejects_oversized_capacity() {
        let result = CacheStore::<String, String>::new(MAX_CAPACITY + 1);
        assert!(matches!(result, Err(AuditError::InvalidConfig(_))));

        let result = CacheStore::<String, String>::new(usize::MAX);
        assert!(matches!(result, Err(AuditError::InvalidConfig(_))));
    }

    #[test]
    fn test_store_accepts_max_capacity() {
        let store = CacheStore::<String, String>::new(MAX_CAPACITY).unwrap();
        assert_eq!(store.capacity(), MAX_CAPACITY);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_observe_and_lookup() {
        let mut store = store(100);

        let outcome = store.observe("1".to_string(), "hi".to_string());
        assert_eq!(outcome, Observation::Inserted);
        assert_eq!(store.lookup("1"), Some("hi".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_lookup_missing() {
        let mut store = store(100);
        assert_eq!(store.lookup("nonexistent"), None);
        assert!(store.is_consistent());
    }

    #[test]
    fn test_store_fifo_eviction() {
        let mut store = store(3);

        store.observe("A".to_string(), "a".to_string());
        store.observe("B".to_string(), "b".to_string());
        store.observe("C".to_string(), "c".to_string());
        let outcome = store.observe("D".to_string(), "d".to_string());

        assert_eq!(outcome, Observation::Evicted("A".to_string()));
        assert_eq!(store.len(), 3);
        assert_eq!(store.lookup("A"), None);
        assert!(store.lookup("B").is_some());
        assert!(store.lookup("C").is_some());
        assert!(store.lookup("D").is_some());
    }

    #[test]
    fn test_store_lookup_does_not_refresh_order() {
        let mut store = store(3);

        store.observe("A".to_string(), "a".to_string());
        store.observe("B".to_string(), "b".to_string());
        store.observe("C".to_string(), "c".to_string());

        // Reading A does not protect it from eviction
        store.lookup("A");
        store.observe("D".to_string(), "d".to_string());

        assert_eq!(store.lookup("A"), None);
        assert_eq!(store.keys(), vec!["B", "C", "D"]);
    }

    #[test]
    fn test_store_overwrite_keeps_position() {
        let mut store = store(2);

        store.observe("A".to_string(), "v1".to_string());
        store.observe("B".to_string(), "b".to_string());
        let outcome = store.observe("A".to_string(), "v2".to_string());

        assert_eq!(outcome, Observation::Replaced);
        assert_eq!(store.len(), 2);
        assert_eq!(store.lookup("A"), Some("v2".to_string()));

        // A is still the oldest insertion
        store.observe("C".to_string(), "c".to_string());
        assert_eq!(store.lookup("A"), None);
        assert_eq!(store.keys(), vec!["B", "C"]);
    }

    #[test]
    fn test_store_update_returns_previous() {
        let mut store = store(10);
        store.observe("1".to_string(), "before".to_string());

        let previous = store.update("1", |value| *value = "after".to_string());

        assert_eq!(previous, Some("before".to_string()));
        assert_eq!(store.lookup("1"), Some("after".to_string()));
        assert_eq!(store.stats().updates, 1);
    }

    #[test]
    fn test_store_update_does_not_refresh_order() {
        let mut store = store(2);

        store.observe("A".to_string(), "a".to_string());
        store.observe("B".to_string(), "b".to_string());
        store.update("A", |value| value.push('!'));
        store.observe("C".to_string(), "c".to_string());

        assert_eq!(store.lookup("A"), None);
        assert_eq!(store.lookup("B"), Some("b".to_string()));
    }

    #[test]
    fn test_store_update_missing_is_noop() {
        let mut store = store(4);
        store.observe("A".to_string(), "a".to_string());
        let keys_before = store.keys();

        let mut called = false;
        let previous = store.update("missing", |_| called = true);

        assert_eq!(previous, None);
        assert!(!called);
        assert_eq!(store.keys(), keys_before);
        assert_eq!(store.stats().update_misses, 1);
        assert!(store.is_consistent());
    }

    #[test]
    fn test_store_stats() {
        let mut store = store(1);

        store.observe("1".to_string(), "x".to_string());
        store.observe("1".to_string(), "y".to_string());
        store.observe("2".to_string(), "z".to_string());
        store.lookup("2");
        store.lookup("1");

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.overwrites, 1);
        assert_eq!(stats.total_entries, 1);
    }

    #[test]
    fn test_capacity_two_scenario() {
        let mut store = store(2);

        store.observe("1".to_string(), "hi".to_string());
        store.observe("2".to_string(), "yo".to_string());
        store.observe("3".to_string(), "sup".to_string());

        assert_eq!(store.lookup("1"), None);
        assert_eq!(store.lookup("2"), Some("yo".to_string()));
        assert_eq!(store.lookup("3"), Some("sup".to_string()));
        assert!(store.is_consistent());
    }
}
