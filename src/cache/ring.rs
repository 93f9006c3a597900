//! FIFO Ring Module
//!
//! Fixed-size circular buffer recording key insertion order for eviction.

// == FIFO Ring ==
/// Tracks insertion order for FIFO eviction.
///
/// Slots are addressed modulo capacity starting at `head`, which always
/// points at the oldest key. A `None` slot has never been assigned since
/// the last eviction and is treated as "nothing to evict".
#[derive(Debug)]
pub struct FifoRing<K> {
    slots: Vec<Option<K>>,
    head: usize,
    len: usize,
}

impl<K> FifoRing<K> {
    // == Constructor ==
    /// Creates a ring with `capacity` empty slots.
    ///
    /// Callers guarantee `capacity > 0`.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            slots,
            head: 0,
            len: 0,
        }
    }

    // == Push ==
    /// Appends a key as the newest entry.
    ///
    /// When the ring is full the oldest slot is reused: its key is returned
    /// and `head` advances by one. Returns `None` while free slots remain,
    /// or when the reused slot held the sentinel.
    pub fn push(&mut self, key: K) -> Option<K> {
        let capacity = self.slots.len();
        if self.len < capacity {
            let tail = (self.head + self.len) % capacity;
            self.slots[tail] = Some(key);
            self.len += 1;
            return None;
        }

        let evicted = self.slots[self.head].replace(key);
        self.head = (self.head + 1) % capacity;
        evicted
    }

    // == Peek Oldest ==
    /// Returns the key that the next full push would evict.
    #[allow(dead_code)]
    pub fn peek_oldest(&self) -> Option<&K> {
        if self.len == 0 {
            return None;
        }
        self.slots[self.head].as_ref()
    }

    // == Iter ==
    /// Iterates keys from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &K> + '_ {
        let capacity = self.slots.len();
        (0..self.len).filter_map(move |offset| self.slots[(self.head + offset) % capacity].as_ref())
    }

    // == Length ==
    /// Returns the number of keys currently tracked.
    pub fn len(&self) -> usize {
        self.len
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Capacity ==
    /// Returns the fixed number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}
