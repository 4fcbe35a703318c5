//! Cache Module
//!
//! Process-local response cache with TTL expiration and LRU eviction.

mod entry;
mod key;
mod lru;
mod stats;
mod store;


use std::sync::Arc;

use tokio::sync::RwLock;

// Re-export public types
pub use entry::CacheEntry;
pub use key::{CacheKey, SEGMENT_SEPARATOR};
pub use lru::AccessOrder;
pub use stats::{CacheStats, Counters};
pub use store::BoundedTtlCache;

/// Cache handle shared between request handlers and background tasks.
pub type SharedCache<V> = Arc<RwLock<BoundedTtlCache<V>>>;
