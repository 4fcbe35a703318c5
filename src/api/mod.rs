//! API Module
//!
//! HTTP surface over the shared response cache.
//!
//! # Endpoints
//! - `PUT /cache/:key` - Memoize a JSON value
//! - `GET /cache/:key` - Read a live value
//! - `GET /cache/:key/exists` - Liveness check
//! - `DELETE /cache/:key` - Remove one key (idempotent)
//! - `DELETE /cache` - Invalidate everything
//! - `POST /purge` - Sweep expired entries
//! - `GET /stats` - Occupancy and hit statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
