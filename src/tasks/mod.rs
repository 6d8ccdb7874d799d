//! Background Tasks Module
//!
//! Contains background tasks that run periodically during gateway operation.
//!
//! # Tasks
//! - Hygiene sweep: removes expired cache entries and lapsed rate windows
//!   at configured intervals

mod cleanup;

pub use cleanup::spawn_cleanup_task;
