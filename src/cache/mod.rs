//! Cache Module
//!
//! Provides a fixed-capacity, in-memory snapshot cache with strict FIFO
//! eviction: the oldest inserted key is evicted first, no matter how often
//! it is read or updated.

mod bounded;
mod ring;
mod stats;
mod store;


/// Largest capacity a cache accepts. The FIFO ring is allocated up front,
/// so the bound keeps a mistyped `CACHE_CAPACITY` from exhausting memory.
pub const MAX_CAPACITY: usize = 1 << 20;

// Re-export public types
pub use bounded::BoundedKeyCache;
pub use ring::FifoRing;
pub use stats::CacheStats;
pub use store::{CacheStore, Observation};
