//! Hygiene Sweep Task
//!
//! Background task that periodically removes expired cache entries and
//! lapsed rate limit windows. Correctness never depends on it: the cache
//! expires lazily on read and the limiter replaces lapsed windows on
//! admission. The sweep only reclaims memory.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;
use crate::limit::RateLimiter;

/// Spawns a background task that periodically sweeps expired state.
///
/// # Arguments
/// * `cache` - Shared reference to the response cache
/// * `limiter` - Shared reference to the rate limiter
/// * `sweep_interval_secs` - Interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_cleanup_task(
    cache: Arc<RwLock<CacheStore>>,
    limiter: Arc<RwLock<RateLimiter>>,
    sweep_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(sweep_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting hygiene sweep task with interval of {} seconds",
            sweep_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed_entries = {
                let mut cache_guard = cache.write().await;
                cache_guard.cleanup_expired()
            };
            let removed_windows = {
                let mut limiter_guard = limiter.write().await;
                limiter_guard.sweep_expired()
            };

            if removed_entries > 0 || removed_windows > 0 {
                info!(
                    removed_entries,
                    removed_windows, "hygiene sweep reclaimed expired state"
                );
            } else {
                debug!("hygiene sweep found nothing expired");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    #[tokio::test]
    async fn test_sweep_removes_expired_entries() {
        let cache = Arc::new(RwLock::new(CacheStore::new()));
        let limiter = Arc::new(RwLock::new(RateLimiter::new(60)));

        {
            let mut cache_guard = cache.write().await;
            cache_guard.set("expire_soon".to_string(), json!("v"), 1);
        }

        let handle = spawn_cleanup_task(cache.clone(), limiter, 1);

        tokio::time::sleep(Duration::from_millis(2500)).await;

        {
            let cache_guard = cache.read().await;
            assert!(
                cache_guard.is_empty(),
                "expired entry should have been swept"
            );
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_preserves_valid_entries() {
        let cache = Arc::new(RwLock::new(CacheStore::new()));
        let limiter = Arc::new(RwLock::new(RateLimiter::new(60)));

        {
            let mut cache_guard = cache.write().await;
            cache_guard.set("long_lived".to_string(), json!("v"), 3600);
        }

        let handle = spawn_cleanup_task(cache.clone(), limiter, 1);

        tokio::time::sleep(Duration::from_millis(1500)).await;

        {
            let mut cache_guard = cache.write().await;
            assert_eq!(
                cache_guard.get("long_lived"),
                Some(json!("v")),
                "valid entry should not be swept"
            );
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_task_can_be_aborted() {
        let cache = Arc::new(RwLock::new(CacheStore::new()));
        let limiter = Arc::new(RwLock::new(RateLimiter::new(60)));

        let handle = spawn_cleanup_task(cache, limiter, 1);

        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
