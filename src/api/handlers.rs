//! API Handlers
//!
//! HTTP request handlers for each cache endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::info;

use crate::cache::{BoundedTtlCache, CacheStats, SharedCache};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    ClearResponse, DeleteResponse, ExistsResponse, GetResponse, HealthResponse, PurgeResponse,
    SetRequest, SetResponse,
};

/// Application state shared across all handlers.
///
/// Holds the single cache instance built at startup. Every handler takes the
/// lock for exactly one cache operation.
#[derive(Clone)]
pub struct AppState {
    pub cache: SharedCache<Value>,
}

impl AppState {
    pub fn new(cache: BoundedTtlCache<Value>) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    /// Creates a new AppState with a cache sized from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(BoundedTtlCache::from_config(config))
    }
}

/// Handler for PUT /cache/:key
pub async fn set_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let ttl = req.ttl();
    let stored = state.cache.write().await.set(key.clone(), req.value, ttl)?;

    Ok(Json(SetResponse::new(key, stored)))
}

/// Handler for GET /cache/:key
///
/// Takes the write lock: a hit updates recency and an expired entry is purged.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let mut cache = state.cache.write().await;
    let value = cache
        .get(&key)
        .ok_or_else(|| CacheError::NotFound(key.clone()))?;
    let ttl_remaining_ms = cache
        .ttl_remaining(&key)
        .map(|ttl| ttl.as_millis() as u64)
        .unwrap_or(0);

    Ok(Json(GetResponse::new(key, value, ttl_remaining_ms)))
}

/// Handler for GET /cache/:key/exists
pub async fn exists_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<ExistsResponse> {
    let exists = state.cache.write().await.has(&key);
    Json(ExistsResponse::new(key, exists))
}

/// Handler for DELETE /cache/:key
///
/// Deleting an absent key succeeds with `deleted: false`.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<DeleteResponse> {
    let deleted = state.cache.write().await.delete(&key);
    Json(DeleteResponse::new(key, deleted))
}

/// Handler for DELETE /cache
///
/// Operator endpoint for flushing this process's cache by hand. In-process
/// write paths call `clear()` on the cache directly.
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let cleared = state.cache.write().await.clear();
    info!(cleared, "Cache cleared");
    Json(ClearResponse::new(cleared))
}

/// Handler for POST /purge
pub async fn purge_handler(State(state): State<AppState>) -> Json<PurgeResponse> {
    let mut cache = state.cache.write().await;
    let purged = cache.purge_expired();
    Json(PurgeResponse {
        purged,
        size: cache.size(),
    })
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.read().await.stats())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    fn test_state(max_size: usize) -> AppState {
        AppState::new(BoundedTtlCache::new(max_size, Duration::from_secs(300)))
    }

    fn set_request(value: Value) -> Json<SetRequest> {
        Json(SetRequest {
            value,
            ttl_ms: None,
        })
    }

    #[tokio::test]
    async fn test_set_and_get_handler() {
        let state = test_state(100);

        let result = set_handler(
            State(state.clone()),
            Path("component:1".to_string()),
            set_request(json!({"name": "whisper"})),
        )
        .await;
        assert!(result.is_ok());

        let response = get_handler(State(state), Path("component:1".to_string()))
            .await
            .unwrap();
        assert_eq!(response.value, json!({"name": "whisper"}));
        assert!(response.ttl_remaining_ms > 0);
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let state = test_state(100);

        let result = get_handler(State(state), Path("missing".to_string())).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_set_empty_key_rejected() {
        let state = test_state(100);

        let result = set_handler(State(state), Path(String::new()), set_request(json!(1))).await;
        assert!(matches!(result, Err(CacheError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_set_null_value_rejected() {
        let state = test_state(100);

        let result = set_handler(
            State(state.clone()),
            Path("k".to_string()),
            set_request(Value::Null),
        )
        .await;

        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
        assert_eq!(stats_handler(State(state)).await.size, 0);
    }

    #[tokio::test]
    async fn test_delete_handler_idempotent() {
        let state = test_state(100);
        set_handler(State(state.clone()), Path("k".to_string()), set_request(json!(1)))
            .await
            .unwrap();

        let first = delete_handler(State(state.clone()), Path("k".to_string())).await;
        let second = delete_handler(State(state.clone()), Path("k".to_string())).await;

        assert!(first.deleted);
        assert!(!second.deleted);
        let exists = exists_handler(State(state), Path("k".to_string())).await;
        assert!(!exists.exists);
    }

    #[tokio::test]
    async fn test_clear_handler() {
        let state = test_state(100);
        for key in ["a", "b", "c"] {
            set_handler(State(state.clone()), Path(key.to_string()), set_request(json!(key)))
                .await
                .unwrap();
        }

        let response = clear_handler(State(state.clone())).await;

        assert_eq!(response.cleared, 3);
        assert_eq!(stats_handler(State(state)).await.size, 0);
    }

    #[tokio::test]
    async fn test_stats_handler_empty() {
        let response = stats_handler(State(test_state(25))).await;
        assert_eq!(response.size, 0);
        assert_eq!(response.max_size, 25);
        assert_eq!(response.hits, 0);
        assert_eq!(response.misses, 0);
    }

    #[tokio::test]
    async fn test_purge_handler() {
        let state = test_state(100);
        state
            .cache
            .write()
            .await
            .set("short", json!(1), Some(Duration::from_millis(10)))
            .unwrap();
        tokio::time::sleep(Duration::from_millis(40)).await;

        let response = purge_handler(State(state)).await;
        assert_eq!(response.purged, 1);
        assert_eq!(response.size, 0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
