//! Cache Entry Module
//!
//! A stored value together with the instant it stops being visible.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single memoized value with its absolute expiry.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Instant at which the entry becomes logically absent
    pub expires_at: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates an entry that expires `ttl` after `now`.
    ///
    /// A TTL large enough to overflow `Instant` is clamped to roughly a
    /// century, which is "never" for a response cache.
    pub fn new(value: V, ttl: Duration, now: Instant) -> Self {
        let expires_at = now
            .checked_add(ttl)
            .unwrap_or_else(|| now + FAR_FUTURE);

        Self { value, expires_at }
    }

    // == Is Expired ==
    /// Checks expiry against a caller-supplied instant.
    ///
    /// Boundary condition: the entry is expired once `now` reaches
    /// `expires_at`, so a TTL that has fully elapsed never yields a hit.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    /// Checks expiry against the current instant.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    // == Time To Live ==
    /// Remaining lifetime, `Duration::ZERO` once expired.
    pub fn ttl_remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}

const FAR_FUTURE: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);
