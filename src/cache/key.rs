//! Cache Key Module
//!
//! Derives deterministic cache keys from a route and its query parameters.
//!
//! Two requests with the same route and the same parameter set must produce
//! the same key regardless of parameter order, and differing parameter sets
//! must never collide. The key is the full canonical string rather than a
//! digest, so there is no truncation to collide on.

use std::collections::HashMap;

// == Cache Key ==
/// Builds the canonical cache key for a route and parameter set.
///
/// Parameters are sorted by name before joining. Delimiter characters inside
/// names and values are escaped so parameter boundaries stay unambiguous:
/// `{"a": "1&b=2"}` and `{"a": "1", "b": "2"}` get distinct keys.
pub fn cache_key(route: &str, params: &HashMap<String, String>) -> String {
    let mut pairs: Vec<(&String, &String)> = params.iter().collect();
    pairs.sort();

    let joined = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", escape(k), escape(v)))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}?{}", escape(route), joined)
}

/// Escapes the key delimiters (`%`, `&`, `=`, `?`) within a component.
fn escape(component: &str) -> String {
    component
        .replace('%', "%25")
        .replace('&', "%26")
        .replace('=', "%3d")
        .replace('?', "%3f")
}
