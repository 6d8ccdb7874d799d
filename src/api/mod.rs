//! API Module
//!
//! HTTP handlers and routing for the gateway's inbound surface.
//!
//! # Endpoints
//! - `GET /api/v3/:route` - Proxy a supported route to the upstream provider
//! - `GET /health` - Health check endpoint
//! - `GET /stats` - Cache statistics
//! - `GET /` - Endpoint index

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
