//! Cache Store Module
//!
//! In-memory response cache with lazy TTL expiration, checked at read time.

use std::collections::HashMap;

use serde_json::Value;
use tracing::warn;

use crate::cache::{CacheEntry, CacheStats, MAX_VALUE_SIZE};

// == Cache Store ==
/// Response cache keyed by canonical request key.
///
/// Expiry is evaluated lazily on `get`; the background sweep in `tasks` only
/// reclaims memory and is not required for correctness.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Performance statistics
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new empty CacheStore.
    pub fn new() -> Self {
        Self::default()
    }

    // == Get ==
    /// Retrieves a cached payload by key.
    ///
    /// Returns `None` both when the key was never set and when the entry has
    /// expired. Expired entries are removed on the way out and counted as
    /// misses.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired() => {
                self.entries.remove(key);
                self.stats.record_expired();
                self.stats.record_miss();
                self.stats.set_total_entries(self.entries.len());
                None
            }
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Set ==
    /// Stores a payload under a key with the given TTL.
    ///
    /// Unconditionally overwrites any existing entry and resets its creation
    /// time. Storing is best-effort: an oversized payload is skipped rather
    /// than failing the request that produced it.
    pub fn set(&mut self, key: String, value: Value, ttl_seconds: u64) {
        let approx_size = serde_json::to_vec(&value).map_or(0, |b| b.len());
        if approx_size > MAX_VALUE_SIZE {
            warn!(
                size = approx_size,
                "skipping cache write, payload exceeds size limit"
            );
            return;
        }

        self.entries.insert(key, CacheEntry::new(value, ttl_seconds));
        self.stats.set_total_entries(self.entries.len());
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            self.entries.remove(&key);
            self.stats.record_expired();
        }

        self.stats.set_total_entries(self.entries.len());
        count
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
