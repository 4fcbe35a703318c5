//! Cache Store Module
//!
//! Bounded response cache combining HashMap storage with recency tracking and
//! lazy per-entry expiry.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::cache::{AccessOrder, CacheEntry, CacheStats, Counters};
use crate::config::Config;
use crate::error::{CacheError, Result};

// == Bounded TTL Cache ==
/// In-memory key/value store with per-entry TTL and LRU eviction.
///
/// Expired entries are only discovered when a read touches them (or when
/// [`purge_expired`](Self::purge_expired) runs), so `size()` may count
/// entries that reads would already report as absent.
///
/// A `max_size` of 0 puts the cache in no-store mode: `set` hands the value
/// back without retaining it.
#[derive(Debug)]
pub struct BoundedTtlCache<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Recency order, least recently used first
    order: AccessOrder,
    /// Lookup counters
    counters: Counters,
    /// Maximum number of entries retained
    max_size: usize,
    /// TTL applied when `set` gets none (or zero)
    default_ttl: Duration,
}

impl<V: Clone> BoundedTtlCache<V> {
    // == Constructor ==
    /// Creates an empty cache.
    ///
    /// # Arguments
    /// * `max_size` - Maximum number of entries held at once
    /// * `default_ttl` - Lifetime of entries stored without an explicit TTL
    pub fn new(max_size: usize, default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::with_capacity(max_size.min(1024)),
            order: AccessOrder::new(),
            counters: Counters::default(),
            max_size,
            default_ttl,
        }
    }

    /// Creates an empty cache sized from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.max_size, config.default_ttl())
    }

    // == Set ==
    /// Stores `value` under `key` and returns it.
    ///
    /// Overwriting an existing key refreshes its TTL and recency and never
    /// evicts another key. Inserting a new key into a full cache evicts the
    /// least recently used entry first.
    ///
    /// # Arguments
    /// * `key` - Non-empty cache key
    /// * `value` - Value to memoize
    /// * `ttl` - Entry lifetime; `None` or zero uses the default TTL
    ///
    /// # Errors
    /// `CacheError::InvalidKey` if `key` is empty.
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl: Option<Duration>) -> Result<V> {
        let key = key.into();
        if key.is_empty() {
            return Err(CacheError::InvalidKey("key cannot be empty".to_string()));
        }

        if self.max_size == 0 {
            debug!(key = %key, "cache disabled (max_size = 0), value not retained");
            return Ok(value);
        }

        let ttl = ttl.filter(|ttl| !ttl.is_zero()).unwrap_or(self.default_ttl);

        if !self.entries.contains_key(&key) {
            while self.entries.len() >= self.max_size {
                if !self.evict_oldest() {
                    break;
                }
            }
        }

        let entry = CacheEntry::new(value.clone(), ttl, Instant::now());
        self.entries.insert(key.clone(), entry);
        self.order.touch(&key);

        Ok(value)
    }

    // == Get ==
    /// Returns a clone of the live value for `key`, marking it most recently
    /// used. Expired entries are purged and reported as a miss.
    pub fn get(&mut self, key: &str) -> Option<V> {
        if !self.touch_live(key) {
            self.counters.record_miss();
            return None;
        }

        self.counters.record_hit();
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Has ==
    /// Whether `key` holds a live value.
    ///
    /// Shares `get`'s semantics: an expired entry is purged, and a hit marks
    /// the key most recently used. Hit/miss counters are left untouched.
    pub fn has(&mut self, key: &str) -> bool {
        self.touch_live(key)
    }

    // == Get Or Insert With ==
    /// Read-through memoization.
    ///
    /// Returns the cached value on a hit. On a miss, calls `compute`, stores
    /// its value with `ttl` and returns it. An error from `compute` is
    /// returned as-is and nothing is stored.
    pub fn get_or_insert_with<F, E>(
        &mut self,
        key: &str,
        ttl: Option<Duration>,
        compute: F,
    ) -> std::result::Result<V, E>
    where
        F: FnOnce() -> std::result::Result<V, E>,
        E: From<CacheError>,
    {
        if let Some(value) = self.get(key) {
            return Ok(value);
        }

        let value = compute()?;
        Ok(self.set(key, value, ttl)?)
    }

    // == Delete ==
    /// Removes `key`. Returns whether an entry was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        if self.entries.remove(key).is_some() {
            self.order.remove(key);
            true
        } else {
            false
        }
    }

    // == Clear ==
    /// Drops every entry and returns how many there were.
    pub fn clear(&mut self) -> usize {
        let dropped = self.entries.len();
        self.entries.clear();
        self.order.clear();
        dropped
    }

    // == Size ==
    /// Raw number of stored entries, including expired entries that no read
    /// has observed yet. Call [`purge_expired`](Self::purge_expired) first
    /// for an exact live count.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Remaining lifetime of a live entry. Does not affect recency.
    pub fn ttl_remaining(&self, key: &str) -> Option<Duration> {
        let now = Instant::now();
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired_at(now))
            .map(|entry| entry.expires_at.saturating_duration_since(now))
    }

    // == Stats ==
    /// Classifies every entry against a single instant. Pure read.
    pub fn stats(&self) -> CacheStats {
        let now = Instant::now();
        let expired_count = self
            .entries
            .values()
            .filter(|entry| entry.is_expired_at(now))
            .count();

        CacheStats {
            size: self.entries.len(),
            max_size: self.max_size,
            valid_count: self.entries.len() - expired_count,
            expired_count,
            hits: self.counters.hits,
            misses: self.counters.misses,
            evictions: self.counters.evictions,
            hit_rate: self.counters.hit_rate(),
        }
    }

    // == Purge Expired ==
    /// Removes every expired entry. Returns the number removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = Instant::now();
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.entries.remove(key);
            self.order.remove(key);
        }

        expired_keys.len()
    }

    /// Keys from least to most recently used.
    pub fn keys_by_recency(&self) -> impl Iterator<Item = &str> {
        self.order.iter()
    }

    // == Internals ==
    /// Touches `key` if it holds a live entry; purges it if expired.
    fn touch_live(&mut self, key: &str) -> bool {
        let expired = match self.entries.get(key) {
            None => return false,
            Some(entry) => entry.is_expired(),
        };

        if expired {
            self.entries.remove(key);
            self.order.remove(key);
            debug!(key = %key, "purged expired entry on access");
            return false;
        }

        self.order.touch(key);
        true
    }

    /// Evicts the least recently used entry. Returns false if nothing was
    /// left to evict.
    fn evict_oldest(&mut self) -> bool {
        match self.order.pop_oldest() {
            Some(victim) => {
                self.entries.remove(&victim);
                self.counters.record_eviction();
                debug!(key = %victim, "evicted least recently used entry");
                true
            }
            None => false,
        }
    }

    /// Checks that the recency order and the entry map hold the same keys.
    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        self.order.len() == self.entries.len()
            && self.order.iter().all(|key| self.entries.contains_key(key))
    }
}
