//! TTL Sweep Task
//!
//! The memory backend drops expired entries lazily on read; this task also
//! reclaims entries that are never read again.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::MemoryBackend;

/// Spawns a task that sweeps expired entries out of `backend` every
/// `cleanup_interval_secs` seconds. Abort the returned handle on shutdown.
pub fn spawn_cleanup_task(backend: &MemoryBackend, cleanup_interval_secs: u64) -> JoinHandle<()> {
    let store = backend.store();
    let period = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting TTL cleanup task with interval of {} seconds",
            period.as_secs()
        );

        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let (removed, remaining) = {
                let mut guard = store.write().await;
                (guard.cleanup_expired(), guard.len())
            };

            if removed > 0 {
                info!(removed, remaining, "TTL cleanup removed expired entries");
            } else {
                debug!(remaining, "TTL cleanup: no expired entries found");
            }
        }
    })
}
