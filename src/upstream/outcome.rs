//! Upstream Outcome Module
//!
//! Classifies the result of a single provider call into retry-eligible and
//! terminal failures.

use std::time::Duration;

use serde_json::Value;

// == Upstream Outcome ==
/// Tagged result of one upstream attempt.
#[derive(Debug, Clone)]
pub enum UpstreamOutcome {
    /// The provider answered with a usable payload.
    Success {
        /// Parsed response body
        payload: Value,
        /// HTTP status returned by the provider
        status: u16,
    },
    /// A failure retry is expected to fix: timeout, connection error, 5xx,
    /// or a provider-side 429.
    Transient {
        /// Human-readable cause, logged per attempt
        reason: String,
        /// Provider-supplied wait hint (from a 429 Retry-After header)
        retry_after: Option<Duration>,
    },
    /// A failure retry cannot fix: 4xx other than 429.
    Permanent {
        /// HTTP status returned by the provider
        status: u16,
        /// Human-readable cause
        reason: String,
    },
}

impl UpstreamOutcome {
    /// Returns true when the retry loop may try again.
    pub fn is_transient(&self) -> bool {
        matches!(self, UpstreamOutcome::Transient { .. })
    }

    /// Classifies a non-2xx provider status.
    ///
    /// 5xx is transient. 429 means the gateway's own outbound call is being
    /// throttled: transient, with the provider's Retry-After as an extended
    /// delay hint. Any other 4xx is permanent.
    pub fn from_status(status: u16, retry_after: Option<Duration>) -> Self {
        if status >= 500 {
            UpstreamOutcome::Transient {
                reason: format!("upstream returned {}", status),
                retry_after: None,
            }
        } else if status == 429 {
            UpstreamOutcome::Transient {
                reason: "upstream throttled the gateway".to_string(),
                retry_after,
            }
        } else {
            UpstreamOutcome::Permanent {
                status,
                reason: format!("upstream rejected the request with {}", status),
            }
        }
    }

    /// Classifies a transport-level failure from the HTTP client.
    ///
    /// Timeouts and connection errors are transient by definition. Body
    /// decode failures are also treated as transient: a truncated payload is
    /// a provider glitch, not a caller error.
    pub fn from_transport_error(err: &reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            "timed out"
        } else if err.is_connect() {
            "connection failed"
        } else if err.is_decode() {
            "returned an unreadable body"
        } else {
            "request failed"
        };

        UpstreamOutcome::Transient {
            reason: format!("upstream {}: {}", kind, err),
            retry_after: None,
        }
    }
}
