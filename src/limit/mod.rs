//! Rate Limiting Module
//!
//! Fixed-window admission control protecting the upstream quota. The
//! limiter is consulted before any cache or upstream work, one bucket per
//! route class.

mod limiter;
mod window;

// Re-export public types
pub use limiter::RateLimiter;
pub use window::CounterWindow;

// == Decision ==
/// The result of an admission check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The request may proceed.
    Allowed {
        /// Rate metadata to surface as response headers
        snapshot: RateSnapshot,
    },
    /// The request is rejected for this window.
    Denied {
        /// Rate metadata to surface as response headers
        snapshot: RateSnapshot,
        /// Seconds until the window resets and admission can succeed
        retry_after_secs: u64,
    },
}

impl Decision {
    /// Returns true when the request was admitted.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed { .. })
    }

    /// Returns the rate metadata regardless of the verdict.
    pub fn snapshot(&self) -> RateSnapshot {
        match self {
            Decision::Allowed { snapshot } | Decision::Denied { snapshot, .. } => {
                snapshot.clone()
            }
        }
    }
}

// == Rate Snapshot ==
/// Point-in-time rate limit metadata for one bucket.
///
/// Surfaced on every pipeline response as `x-ratelimit-*` headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateSnapshot {
    /// Configured admissions per window
    pub limit: u32,
    /// Admissions left in the current window
    pub remaining: u32,
    /// Seconds until the current window resets
    pub reset_secs: u64,
}
