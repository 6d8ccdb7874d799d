//! Response DTOs for the gateway API
//!
//! Defines the structure of the gateway's own response bodies. Proxied
//! payloads pass through untouched and never use these types.

use serde::Serialize;

/// Error envelope for every failure outcome.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error details
    pub error: ErrorDetail,
}

/// The inner error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetail {
    /// Human-readable description
    pub message: String,
    /// Stable machine-readable code
    pub code: String,
    /// Correlation id of the failing request
    pub request_id: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse.
    pub fn new(
        message: impl Into<String>,
        code: impl Into<String>,
        request_id: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorDetail {
                message: message.into(),
                code: code.into(),
                request_id: request_id.into(),
            },
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
    /// Gateway version
    pub version: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp.
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of reads served from the cache
    pub cache_hits: u64,
    /// Number of reads that went upstream
    pub cache_misses: u64,
    /// Number of entries that lapsed
    pub cache_expired: u64,
    /// Current number of cached entries
    pub cached_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics.
    pub fn new(stats: &crate::cache::CacheStats) -> Self {
        Self {
            cache_hits: stats.hits,
            cache_misses: stats.misses,
            cache_expired: stats.expired,
            cached_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the root endpoint (GET /)
#[derive(Debug, Clone, Serialize)]
pub struct IndexResponse {
    /// Gateway name
    pub message: String,
    /// Gateway version
    pub version: String,
    /// Supported proxy routes, as full paths
    pub routes: Vec<String>,
}

impl IndexResponse {
    /// Creates a new IndexResponse from supported route names.
    pub fn new(route_names: &[&str]) -> Self {
        Self {
            message: "Football Data Gateway".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            routes: route_names
                .iter()
                .map(|name| format!("/api/v3/{}", name))
                .collect(),
        }
    }
}
