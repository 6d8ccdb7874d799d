//! Pitchside - A caching, rate-limiting gateway for football data
//!
//! Sits between API clients and an upstream REST data provider, shielding
//! the provider's quota with per-route-class rate limits and a TTL response
//! cache, and hiding provider instability behind bounded retries.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod gateway;
pub mod limit;
pub mod models;
pub mod tasks;
pub mod upstream;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_cleanup_task;
