//! Response models for the gateway API
//!
//! DTOs for the gateway's own endpoints; proxied upstream payloads are
//! passed through verbatim and never deserialized into domain types.

pub mod responses;

// Re-export commonly used types
pub use responses::{ErrorDetail, ErrorResponse, HealthResponse, IndexResponse, StatsResponse};
