//! Catalog Cache - process-local response cache for the component catalog
//!
//! Memoizes read-heavy list/detail/search responses with per-entry TTL and
//! LRU eviction, and serves the cache over a small HTTP API.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{BoundedTtlCache, CacheKey, CacheStats, SharedCache};
pub use config::Config;
pub use error::CacheError;
pub use tasks::spawn_sweep_task;
