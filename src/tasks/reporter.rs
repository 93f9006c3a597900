//! Stats Reporter Task
//!
//! Background task that periodically logs snapshot cache statistics.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::audit::MessageCache;
use crate::cache::CacheStats;

/// Spawns a background task that logs cache statistics at a fixed interval.
///
/// A report is logged at `info` when cached entries changed since the
/// previous report and at `debug` otherwise. Lookups alone do not count as
/// a change. The task only reads counters;
/// it never mutates the cache.
///
/// # Arguments
/// * `cache` - shared handle to the snapshot cache
/// * `interval_secs` - seconds between reports, must be non-zero
///
/// # Returns
/// A JoinHandle for the spawned task, aborted during graceful shutdown.
pub fn spawn_stats_reporter(cache: Arc<MessageCache>, interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs.max(1));

    tokio::spawn(async move {
        info!("Starting stats reporter with interval of {} seconds", interval.as_secs());

        let mut previous = cache.stats();
        loop {
            tokio::time::sleep(interval).await;

            let stats = cache.stats();
            if entries_changed(&previous, &stats) {
                info!(
                    entries = stats.total_entries,
                    capacity = cache.capacity(),
                    hits = stats.hits,
                    misses = stats.misses,
                    evictions = stats.evictions,
                    updates = stats.updates,
                    hit_rate = stats.hit_rate(),
                    "Snapshot cache stats"
                );
            } else {
                debug!("Snapshot cache stats unchanged");
            }
            previous = stats;
        }
    })
}

/// True when inserts, evictions, overwrites or edits happened between two reports.
fn entries_changed(previous: &CacheStats, current: &CacheStats) -> bool {
    previous.total_entries != current.total_entries
        || previous.evictions != current.evictions
        || previous.overwrites != current.overwrites
        || previous.updates != current.updates
}
