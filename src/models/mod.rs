//! Request and Response models for the cache HTTP API
//!
//! DTOs used for serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

pub use requests::SetRequest;
pub use responses::{
    ClearResponse, DeleteResponse, ErrorResponse, ExistsResponse, GetResponse, HealthResponse,
    PurgeResponse, SetResponse,
};
