//! Response Mapper Module
//!
//! Pure translation of pipeline terminal outcomes into HTTP responses.
//! Every response past route resolution carries rate-limit metadata headers;
//! successful responses also indicate whether they came from the cache.

use axum::{
    http::{header::RETRY_AFTER, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use crate::cache::current_timestamp_ms;
use crate::limit::RateSnapshot;
use crate::models::ErrorResponse;

// == Header Names ==
pub const HEADER_REQUEST_ID: &str = "x-request-id";
pub const HEADER_CACHE: &str = "x-cache";
pub const HEADER_LIMIT: &str = "x-ratelimit-limit";
pub const HEADER_REMAINING: &str = "x-ratelimit-remaining";
pub const HEADER_RESET: &str = "x-ratelimit-reset";

// == Cache Status ==
/// Whether a successful response was served from the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    /// Header value for the cache-status indicator.
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheStatus::Hit => "hit",
            CacheStatus::Miss => "miss",
        }
    }
}

// == Outcome Kind ==
/// The terminal state of one pipeline invocation.
#[derive(Debug, Clone)]
pub enum OutcomeKind {
    /// Payload available, from cache or a fresh fetch.
    Success {
        payload: Value,
        cache: CacheStatus,
    },
    /// The rate limiter denied admission.
    RateLimited { retry_after_secs: u64 },
    /// The route identifier is not in the table.
    InvalidRoute { route: String },
    /// Retries exhausted on transient upstream failures.
    UpstreamUnavailable { reason: String },
    /// The upstream rejected the request outright.
    UpstreamRejected { status: u16, reason: String },
}

// == Request Outcome ==
/// A terminal outcome plus the metadata the mapper attaches to it.
#[derive(Debug, Clone)]
pub struct RequestOutcome {
    pub kind: OutcomeKind,
    /// Rate metadata, present for every outcome past route resolution
    pub rate: Option<RateSnapshot>,
    /// Completion timestamp (Unix milliseconds)
    pub completed_at: u64,
}

impl RequestOutcome {
    /// Wraps a terminal outcome, stamping the completion time.
    pub fn new(kind: OutcomeKind, rate: Option<RateSnapshot>) -> Self {
        Self {
            kind,
            rate,
            completed_at: current_timestamp_ms(),
        }
    }
}

// == Response Mapper ==
/// Maps a terminal outcome to `(status, headers, body)`.
///
/// Success bodies are the upstream payload verbatim; failures use the
/// structured error envelope with a stable machine-readable code.
pub fn to_response(outcome: RequestOutcome, request_id: &str) -> Response {
    let mut headers = HeaderMap::new();
    insert_str(&mut headers, HEADER_REQUEST_ID, request_id);

    if let Some(rate) = &outcome.rate {
        headers.insert(HeaderName::from_static(HEADER_LIMIT), HeaderValue::from(rate.limit));
        headers.insert(
            HeaderName::from_static(HEADER_REMAINING),
            HeaderValue::from(rate.remaining),
        );
        headers.insert(HeaderName::from_static(HEADER_RESET), HeaderValue::from(rate.reset_secs));
    }

    match outcome.kind {
        OutcomeKind::Success { payload, cache } => {
            insert_str(&mut headers, HEADER_CACHE, cache.as_str());
            (StatusCode::OK, headers, Json(payload)).into_response()
        }
        OutcomeKind::RateLimited { retry_after_secs } => {
            headers.insert(RETRY_AFTER, HeaderValue::from(retry_after_secs));
            let body = ErrorResponse::new(
                "rate limit exceeded, retry after the window resets",
                "RATE_LIMIT_EXCEEDED",
                request_id,
            );
            (StatusCode::TOO_MANY_REQUESTS, headers, Json(body)).into_response()
        }
        OutcomeKind::InvalidRoute { route } => {
            let body = ErrorResponse::new(
                format!("unsupported route: {}", route),
                "ROUTE_NOT_FOUND",
                request_id,
            );
            (StatusCode::NOT_FOUND, headers, Json(body)).into_response()
        }
        OutcomeKind::UpstreamUnavailable { reason } => {
            let body = ErrorResponse::new(
                format!("upstream unavailable: {}", reason),
                "UPSTREAM_UNAVAILABLE",
                request_id,
            );
            (StatusCode::BAD_GATEWAY, headers, Json(body)).into_response()
        }
        OutcomeKind::UpstreamRejected { status, reason } => {
            // Mirror the upstream's semantic category
            let status =
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            let body = ErrorResponse::new(
                format!("upstream rejected the request: {}", reason),
                "UPSTREAM_REJECTED",
                request_id,
            );
            (status, headers, Json(body)).into_response()
        }
    }
}

/// Inserts a string header, skipping values that cannot be encoded.
fn insert_str(headers: &mut HeaderMap, name: &'static str, value: &str) {
    if let Ok(value) = HeaderValue::from_str(value) {
        headers.insert(HeaderName::from_static(name), value);
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot() -> RateSnapshot {
        RateSnapshot {
            limit: 30,
            remaining: 12,
            reset_secs: 41,
        }
    }

    fn header<'a>(response: &'a Response, name: &str) -> Option<&'a str> {
        response.headers().get(name).and_then(|v| v.to_str().ok())
    }

    #[test]
    fn test_success_hit_response() {
        let outcome = RequestOutcome::new(
            OutcomeKind::Success {
                payload: json!({"response": []}),
                cache: CacheStatus::Hit,
            },
            Some(snapshot()),
        );
        let response = to_response(outcome, "req-1");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(header(&response, HEADER_CACHE), Some("hit"));
        assert_eq!(header(&response, HEADER_LIMIT), Some("30"));
        assert_eq!(header(&response, HEADER_REMAINING), Some("12"));
        assert_eq!(header(&response, HEADER_RESET), Some("41"));
        assert_eq!(header(&response, HEADER_REQUEST_ID), Some("req-1"));
    }

    #[test]
    fn test_success_miss_marks_header() {
        let outcome = RequestOutcome::new(
            OutcomeKind::Success {
                payload: json!([]),
                cache: CacheStatus::Miss,
            },
            Some(snapshot()),
        );
        let response = to_response(outcome, "req-2");

        assert_eq!(header(&response, HEADER_CACHE), Some("miss"));
    }

    #[test]
    fn test_rate_limited_response() {
        let outcome = RequestOutcome::new(
            OutcomeKind::RateLimited {
                retry_after_secs: 41,
            },
            Some(RateSnapshot {
                limit: 30,
                remaining: 0,
                reset_secs: 41,
            }),
        );
        let response = to_response(outcome, "req-3");

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(header(&response, "retry-after"), Some("41"));
        assert_eq!(header(&response, HEADER_REMAINING), Some("0"));
    }

    #[test]
    fn test_invalid_route_response() {
        let outcome = RequestOutcome::new(
            OutcomeKind::InvalidRoute {
                route: "transfers".to_string(),
            },
            None,
        );
        let response = to_response(outcome, "req-4");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(header(&response, HEADER_LIMIT).is_none());
    }

    #[test]
    fn test_upstream_unavailable_response() {
        let outcome = RequestOutcome::new(
            OutcomeKind::UpstreamUnavailable {
                reason: "timed out".to_string(),
            },
            Some(snapshot()),
        );
        let response = to_response(outcome, "req-5");

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_upstream_rejected_mirrors_status() {
        let outcome = RequestOutcome::new(
            OutcomeKind::UpstreamRejected {
                status: 403,
                reason: "forbidden".to_string(),
            },
            Some(snapshot()),
        );
        let response = to_response(outcome, "req-6");

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
