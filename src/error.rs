//! Error types for the gateway
//!
//! Provides unified error handling using thiserror.
//!
//! Per-request failures (rate limited, unknown route, upstream trouble) are
//! not errors at this level: the pipeline reports them as terminal outcomes
//! and the response mapper translates them. This enum covers the faults that
//! prevent the gateway from being assembled in the first place.

use thiserror::Error;

// == Gateway Error Enum ==
/// Unified error type for gateway startup and wiring.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration is missing or inconsistent
    #[error("configuration error: {0}")]
    Config(String),

    /// The upstream HTTP client could not be constructed
    #[error("failed to build upstream client: {0}")]
    ClientBuild(#[from] reqwest::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the gateway.
pub type Result<T> = std::result::Result<T, GatewayError>;
