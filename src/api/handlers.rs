//! API Handlers
//!
//! HTTP request handlers for the gateway endpoints.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Path, Query, State},
    response::Response,
    Json,
};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::Result;
use crate::gateway::{to_response, Pipeline, RouteTable};
use crate::limit::RateLimiter;
use crate::models::{HealthResponse, IndexResponse, StatsResponse};
use crate::upstream::UpstreamClient;

/// Application state shared across all handlers.
///
/// The pipeline is constructed once at startup and owns references to its
/// cache and limiter; the state also keeps direct handles for the stats
/// endpoint and the background sweep.
#[derive(Clone)]
pub struct AppState {
    /// The request-handling pipeline
    pub pipeline: Arc<Pipeline>,
    /// Thread-safe response cache
    pub cache: Arc<RwLock<CacheStore>>,
    /// Thread-safe admission counters
    pub limiter: Arc<RwLock<RateLimiter>>,
}

impl AppState {
    /// Creates the full application state from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = Arc::new(RwLock::new(CacheStore::new()));
        let limiter = Arc::new(RwLock::new(RateLimiter::new(config.rate_window_secs)));
        let upstream = UpstreamClient::new(config)?;
        let pipeline = Arc::new(Pipeline::new(
            RouteTable::standard(config),
            limiter.clone(),
            cache.clone(),
            upstream,
        ));

        Ok(Self {
            pipeline,
            cache,
            limiter,
        })
    }
}

/// Handler for GET /api/v3/{route}
///
/// Forwards the query parameters verbatim into the pipeline and maps the
/// terminal outcome to an HTTP response. Each request gets a short
/// correlation id that tags every log event and the response itself.
pub async fn proxy_handler(
    State(state): State<AppState>,
    Path(route): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let request_id = new_request_id();
    let started = Instant::now();

    info!(
        request_id = %request_id,
        route = %route,
        params = params.len(),
        "request start"
    );

    let outcome = state.pipeline.handle(&route, &params, &request_id).await;
    let response = to_response(outcome, &request_id);

    info!(
        request_id = %request_id,
        route = %route,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request complete"
    );

    response
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.read().await;
    Json(StatsResponse::new(&cache.stats()))
}

/// Handler for GET /
///
/// Lists the routes this gateway proxies.
pub async fn index_handler(State(state): State<AppState>) -> Json<IndexResponse> {
    Json(IndexResponse::new(&state.pipeline.routes().route_names()))
}

/// Generates a short request-correlation id.
fn new_request_id() -> String {
    let id = Uuid::new_v4().simple().to_string();
    id[..8].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> AppState {
        let config = Config {
            upstream_api_key: "test-key".to_string(),
            upstream_base_url: "http://127.0.0.1:9".to_string(),
            retry_max_attempts: 1,
            retry_base_delay_ms: 1,
            ..Config::default()
        };
        AppState::from_config(&config).unwrap()
    }

    #[tokio::test]
    async fn test_proxy_handler_unknown_route() {
        let state = test_state();

        let response = proxy_handler(
            State(state),
            Path("transfers".to_string()),
            Query(HashMap::new()),
        )
        .await;

        assert_eq!(response.status(), 404);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }

    #[tokio::test]
    async fn test_stats_handler_starts_empty() {
        let state = test_state();

        let response = stats_handler(State(state)).await;
        assert_eq!(response.cache_hits, 0);
        assert_eq!(response.cache_misses, 0);
        assert_eq!(response.cached_entries, 0);
    }

    #[tokio::test]
    async fn test_index_handler_lists_routes() {
        let state = test_state();

        let response = index_handler(State(state)).await;
        assert_eq!(response.routes.len(), 10);
        assert!(response.routes.contains(&"/api/v3/fixtures".to_string()));
    }

    #[test]
    fn test_request_id_is_short_hex() {
        let id = new_request_id();
        assert_eq!(id.len(), 8);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
