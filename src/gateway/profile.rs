//! Route Profile Module
//!
//! Static per-route configuration: upstream path, freshness window, and
//! rate limit class. The table is fixed at startup and immutable after.

use std::collections::HashMap;

use crate::config::Config;

// == Route Class ==
/// Rate/freshness class of a route.
///
/// Live data changes minute to minute and gets short TTLs and a tight rate
/// bucket; static data changes rarely and gets long TTLs and a generous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    Static,
    Live,
}

impl RouteClass {
    /// The rate limiter bucket this class accounts against.
    pub fn bucket(&self) -> &'static str {
        match self {
            RouteClass::Static => "static",
            RouteClass::Live => "live",
        }
    }
}

// == Route Profile ==
/// Resolved configuration for one logical route.
#[derive(Debug, Clone)]
pub struct RouteProfile {
    /// Upstream path the route maps to
    pub upstream_path: String,
    /// Rate/freshness class
    pub class: RouteClass,
    /// Admissions per window for this route's bucket
    pub rate_limit: u32,
    /// Cache TTL in seconds
    pub cache_ttl: u64,
}

// == Route Table ==
/// Lookup table of supported routes.
#[derive(Debug, Clone)]
pub struct RouteTable {
    profiles: HashMap<String, RouteProfile>,
}

/// Routes whose data changes rarely (rosters, venues, competition metadata)
const STATIC_ROUTES: [&str; 6] = ["leagues", "teams", "players", "countries", "seasons", "venues"];

/// Routes whose data moves during matches
const LIVE_ROUTES: [&str; 4] = ["fixtures", "standings", "odds", "predictions"];

impl RouteTable {
    // == Standard Table ==
    /// Builds the fixed route table with limits and TTLs from configuration.
    ///
    /// Each route maps to the identically-named upstream path. The
    /// static/live split is an explicit table, not an inferred rule.
    pub fn standard(config: &Config) -> Self {
        let mut profiles = HashMap::new();

        for name in STATIC_ROUTES {
            profiles.insert(
                name.to_string(),
                RouteProfile {
                    upstream_path: name.to_string(),
                    class: RouteClass::Static,
                    rate_limit: config.rate_limit_static,
                    cache_ttl: config.cache_ttl_static,
                },
            );
        }

        for name in LIVE_ROUTES {
            profiles.insert(
                name.to_string(),
                RouteProfile {
                    upstream_path: name.to_string(),
                    class: RouteClass::Live,
                    rate_limit: config.rate_limit_live,
                    cache_ttl: config.cache_ttl_live,
                },
            );
        }

        Self { profiles }
    }

    // == Lookup ==
    /// Resolves a route identifier, or None for unsupported routes.
    pub fn lookup(&self, route: &str) -> Option<&RouteProfile> {
        self.profiles.get(route)
    }

    // == Route Names ==
    /// Returns all supported route names, sorted.
    pub fn route_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of supported routes.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Returns true if no routes are registered.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
