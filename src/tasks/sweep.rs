//! Expiry Sweep Task
//!
//! Periodically purges expired entries so idle keys do not sit in memory
//! until the next eviction. Reads never depend on it: expiry is still
//! enforced lazily on every access.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SharedCache;

/// Spawns a task that calls `purge_expired` on `cache` every `interval`.
///
/// The write lock is held only for the duration of one purge. The returned
/// handle is aborted during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(RwLock::new(BoundedTtlCache::<Value>::new(50, ttl)));
/// let sweep_handle = spawn_sweep_task(cache.clone(), Duration::from_secs(60));
/// // Later, during shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_sweep_task<V>(cache: SharedCache<V>, interval: Duration) -> JoinHandle<()>
where
    V: Clone + Send + Sync + 'static,
{
    tokio::spawn(async move {
        info!(interval_ms = interval.as_millis() as u64, "Starting expiry sweep task");

        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately; skip it so the first sweep
        // happens one interval after startup.
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let removed = cache.write().await.purge_expired();

            if removed > 0 {
                info!("Expiry sweep: removed {} expired entries", removed);
            } else {
                debug!("Expiry sweep: no expired entries found");
            }
        }
    })
}
