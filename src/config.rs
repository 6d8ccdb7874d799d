//! Configuration Module
//!
//! Handles loading and managing gateway configuration from environment variables.

use std::env;

use crate::error::{GatewayError, Result};

/// Gateway configuration parameters.
///
/// All values can be configured via environment variables with sensible
/// defaults, except the upstream API key which must be provided.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the upstream data provider
    pub upstream_base_url: String,
    /// API key sent with every upstream request (required, never logged)
    pub upstream_api_key: String,
    /// API host header value expected by the provider
    pub upstream_api_host: String,
    /// Cache TTL in seconds for static routes (leagues, teams, ...)
    pub cache_ttl_static: u64,
    /// Cache TTL in seconds for live routes (fixtures, odds, ...)
    pub cache_ttl_live: u64,
    /// Admissions per window for static routes
    pub rate_limit_static: u32,
    /// Admissions per window for live routes
    pub rate_limit_live: u32,
    /// Rate limit window length in seconds
    pub rate_window_secs: u64,
    /// Per-attempt upstream request timeout in seconds
    pub upstream_timeout_secs: u64,
    /// Maximum upstream attempts per request (first try included)
    pub retry_max_attempts: u32,
    /// Base retry delay in milliseconds, doubled on each attempt
    pub retry_base_delay_ms: u64,
    /// Upper bound on the computed retry delay in milliseconds
    pub retry_max_delay_ms: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `UPSTREAM_BASE_URL` - Provider base URL (default: api-sports v3)
    /// - `UPSTREAM_API_KEY` - Provider API key (required, no default)
    /// - `UPSTREAM_API_HOST` - Provider host header (default: api-sports v3)
    /// - `CACHE_TTL_STATIC` - Static route TTL in seconds (default: 86400)
    /// - `CACHE_TTL_LIVE` - Live route TTL in seconds (default: 300)
    /// - `RATE_LIMIT_STATIC` - Static route admissions per window (default: 100)
    /// - `RATE_LIMIT_LIVE` - Live route admissions per window (default: 30)
    /// - `RATE_WINDOW_SECS` - Rate limit window in seconds (default: 60)
    /// - `UPSTREAM_TIMEOUT_SECS` - Per-attempt timeout (default: 30)
    /// - `RETRY_MAX_ATTEMPTS` - Upstream attempts per request (default: 3)
    /// - `RETRY_BASE_DELAY_MS` - Base backoff delay (default: 1000)
    /// - `RETRY_MAX_DELAY_MS` - Backoff delay ceiling (default: 10000)
    /// - `SERVER_PORT` - HTTP server port (default: 8000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        Self {
            upstream_base_url: env::var("UPSTREAM_BASE_URL")
                .unwrap_or_else(|_| "https://v3.football.api-sports.io".to_string()),
            upstream_api_key: env::var("UPSTREAM_API_KEY").unwrap_or_default(),
            upstream_api_host: env::var("UPSTREAM_API_HOST")
                .unwrap_or_else(|_| "v3.football.api-sports.io".to_string()),
            cache_ttl_static: env_parse("CACHE_TTL_STATIC", 86_400),
            cache_ttl_live: env_parse("CACHE_TTL_LIVE", 300),
            rate_limit_static: env_parse("RATE_LIMIT_STATIC", 100),
            rate_limit_live: env_parse("RATE_LIMIT_LIVE", 30),
            rate_window_secs: env_parse("RATE_WINDOW_SECS", 60),
            upstream_timeout_secs: env_parse("UPSTREAM_TIMEOUT_SECS", 30),
            retry_max_attempts: env_parse("RETRY_MAX_ATTEMPTS", 3),
            retry_base_delay_ms: env_parse("RETRY_BASE_DELAY_MS", 1_000),
            retry_max_delay_ms: env_parse("RETRY_MAX_DELAY_MS", 10_000),
            server_port: env_parse("SERVER_PORT", 8000),
            cleanup_interval: env_parse("CLEANUP_INTERVAL", 60),
        }
    }

    /// Validates the configuration.
    ///
    /// The gateway refuses to start without an upstream credential or with a
    /// retry budget that would never attempt the call at all.
    pub fn validate(&self) -> Result<()> {
        if self.upstream_api_key.is_empty() {
            return Err(GatewayError::Config(
                "UPSTREAM_API_KEY must be set".to_string(),
            ));
        }
        if self.upstream_base_url.is_empty() {
            return Err(GatewayError::Config(
                "UPSTREAM_BASE_URL must not be empty".to_string(),
            ));
        }
        if self.retry_max_attempts == 0 {
            return Err(GatewayError::Config(
                "RETRY_MAX_ATTEMPTS must be at least 1".to_string(),
            ));
        }
        if self.rate_window_secs == 0 {
            return Err(GatewayError::Config(
                "RATE_WINDOW_SECS must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            upstream_base_url: "https://v3.football.api-sports.io".to_string(),
            upstream_api_key: String::new(),
            upstream_api_host: "v3.football.api-sports.io".to_string(),
            cache_ttl_static: 86_400,
            cache_ttl_live: 300,
            rate_limit_static: 100,
            rate_limit_live: 30,
            rate_window_secs: 60,
            upstream_timeout_secs: 30,
            retry_max_attempts: 3,
            retry_base_delay_ms: 1_000,
            retry_max_delay_ms: 10_000,
            server_port: 8000,
            cleanup_interval: 60,
        }
    }
}

/// Parses an environment variable, falling back to the default when unset
/// or unparseable.
fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
