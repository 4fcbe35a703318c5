//! Background Tasks Module
//!
//! Cooperative timers that run alongside the HTTP server.
//!
//! # Tasks
//! - Expiry sweep: reclaims expired cache entries nobody has read since
//!   they expired

mod sweep;

pub use sweep::spawn_sweep_task;
