//! Request DTOs for the cache HTTP API

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

/// Request body for `PUT /cache/:key`
///
/// # Fields
/// - `value`: Any JSON document, typically a memoized API response body
/// - `ttl_ms`: Optional TTL in milliseconds; absent or 0 uses the default
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    pub value: Value,
    #[serde(default)]
    pub ttl_ms: Option<u64>,
}

impl SetRequest {
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl_ms.map(Duration::from_millis)
    }

    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    /// `null` is rejected: read-path callers treat it as "not cached".
    pub fn validate(&self) -> Option<String> {
        if self.value.is_null() {
            return Some("Value cannot be null".to_string());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_request_deserialize() {
        let json = r#"{"value": {"items": [1, 2], "total": 2}}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.value, json!({"items": [1, 2], "total": 2}));
        assert!(req.ttl().is_none());
    }

    #[test]
    fn test_set_request_with_ttl() {
        let json = r#"{"value": "hello", "ttl_ms": 1500}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.ttl(), Some(Duration::from_millis(1500)));
    }

    #[test]
    fn test_validate_null_value() {
        let req: SetRequest = serde_json::from_str(r#"{"value": null}"#).unwrap();
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_valid_request() {
        let req: SetRequest = serde_json::from_str(r#"{"value": [], "ttl_ms": 60}"#).unwrap();
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_set_request_requires_value() {
        let result: Result<SetRequest, _> = serde_json::from_str(r#"{"ttl_ms": 10}"#);
        assert!(result.is_err());
    }
}
