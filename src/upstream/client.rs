//! Upstream Client Module
//!
//! Performs authenticated calls to the data provider with bounded retries
//! and exponential backoff between attempts.

use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue, RETRY_AFTER};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{GatewayError, Result};
use crate::upstream::UpstreamOutcome;

// == Upstream Client ==
/// HTTP client for the upstream data provider.
///
/// Credentials ride as default headers on every request and are marked
/// sensitive so they never appear in logs. Each attempt is bounded by the
/// configured timeout; a timed-out attempt is a transient failure that
/// triggers backoff, not an immediate error to the caller.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
    max_attempts: u32,
    base_delay: Duration,
    max_delay: Duration,
}

impl UpstreamClient {
    // == Constructor ==
    /// Builds the client from configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let mut api_key = HeaderValue::from_str(&config.upstream_api_key)
            .map_err(|_| GatewayError::Config("UPSTREAM_API_KEY is not a valid header value".to_string()))?;
        api_key.set_sensitive(true);

        let host = HeaderValue::from_str(&config.upstream_api_host)
            .map_err(|_| GatewayError::Config("UPSTREAM_API_HOST is not a valid header value".to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert("x-rapidapi-key", api_key);
        headers.insert("x-rapidapi-host", host);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.upstream_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.upstream_base_url.trim_end_matches('/').to_string(),
            max_attempts: config.retry_max_attempts,
            base_delay: Duration::from_millis(config.retry_base_delay_ms),
            max_delay: Duration::from_millis(config.retry_max_delay_ms),
        })
    }

    // == Fetch ==
    /// Calls the provider, retrying transient failures up to the configured
    /// attempt budget with exponential backoff between attempts.
    ///
    /// Permanent failures return immediately. Once the budget is exhausted
    /// the final transient outcome is returned as-is; the pipeline surfaces
    /// it, never swallows it.
    pub async fn fetch(
        &self,
        path: &str,
        params: &[(String, String)],
        request_id: &str,
    ) -> UpstreamOutcome {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let outcome = self.attempt(path, params, request_id, attempt).await;

            match &outcome {
                UpstreamOutcome::Transient {
                    reason,
                    retry_after,
                } if attempt < self.max_attempts => {
                    // A provider Retry-After overrides the schedule when longer
                    let delay = self
                        .backoff_delay(attempt)
                        .max(retry_after.unwrap_or(Duration::ZERO));
                    warn!(
                        request_id,
                        path,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        reason = %reason,
                        "upstream attempt failed, backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
                _ => return outcome,
            }
        }
    }

    // == Attempt ==
    /// Performs a single provider call and classifies the result.
    async fn attempt(
        &self,
        path: &str,
        params: &[(String, String)],
        request_id: &str,
        attempt: u32,
    ) -> UpstreamOutcome {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        debug!(request_id, %url, attempt, "upstream request start");
        let started = Instant::now();

        let response = match self.http.get(&url).query(params).send().await {
            Ok(response) => response,
            Err(err) => return UpstreamOutcome::from_transport_error(&err),
        };

        let status = response.status().as_u16();
        let elapsed_ms = started.elapsed().as_millis() as u64;

        if !response.status().is_success() {
            let retry_after = parse_retry_after(response.headers());
            warn!(request_id, path, status, elapsed_ms, "upstream responded with error status");
            return UpstreamOutcome::from_status(status, retry_after);
        }

        match response.json::<Value>().await {
            Ok(payload) => {
                info!(request_id, path, status, elapsed_ms, "upstream request succeeded");
                UpstreamOutcome::Success { payload, status }
            }
            Err(err) => UpstreamOutcome::from_transport_error(&err),
        }
    }

    // == Backoff Delay ==
    /// Computes the delay before the next attempt: the base delay doubled
    /// per completed attempt, clamped to the configured ceiling.
    fn backoff_delay(&self, completed_attempts: u32) -> Duration {
        let exponent = completed_attempts.saturating_sub(1).min(16);
        let ms = self.base_delay.as_millis() as u64 * (1u64 << exponent);
        Duration::from_millis(ms.min(self.max_delay.as_millis() as u64))
    }
}

/// Parses a seconds-valued Retry-After header; HTTP-date forms are ignored.
fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}
