//! Request Pipeline Module
//!
//! Orchestrates one inbound request: resolve the route profile, consult the
//! rate limiter, check the cache, and only then call upstream. The pipeline
//! owns references to its collaborators; there is no process-global state.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::cache::{cache_key, CacheStore};
use crate::gateway::{CacheStatus, OutcomeKind, RequestOutcome, RouteTable};
use crate::limit::{Decision, RateLimiter};
use crate::upstream::{UpstreamClient, UpstreamOutcome};

// == Pipeline ==
/// The per-request orchestration core.
///
/// Constructed once at startup and shared across handlers; holds owned
/// references to the cache, limiter, and upstream client.
pub struct Pipeline {
    routes: RouteTable,
    limiter: Arc<RwLock<RateLimiter>>,
    cache: Arc<RwLock<CacheStore>>,
    upstream: UpstreamClient,
}

impl Pipeline {
    // == Constructor ==
    /// Creates a new Pipeline over its collaborators.
    pub fn new(
        routes: RouteTable,
        limiter: Arc<RwLock<RateLimiter>>,
        cache: Arc<RwLock<CacheStore>>,
        upstream: UpstreamClient,
    ) -> Self {
        Self {
            routes,
            limiter,
            cache,
            upstream,
        }
    }

    /// The route table this pipeline serves.
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    // == Handle ==
    /// Runs one request through the pipeline to a terminal outcome.
    ///
    /// `Start → RateCheck → CacheCheck → UpstreamCall → StoreAndRespond`,
    /// terminating early on unknown routes, denied admissions, and cache
    /// hits. A denied request does no cache or upstream work at all, and
    /// upstream failures are never written to the cache.
    pub async fn handle(
        &self,
        route: &str,
        params: &HashMap<String, String>,
        request_id: &str,
    ) -> RequestOutcome {
        // Start: resolve the route profile, failing fast on unknown routes
        let Some(profile) = self.routes.lookup(route) else {
            warn!(request_id, route, "unknown route");
            return RequestOutcome::new(
                OutcomeKind::InvalidRoute {
                    route: route.to_string(),
                },
                None,
            );
        };

        // RateCheck: the whole read-increment-compare runs under the lock
        let decision = {
            let mut limiter = self.limiter.write().await;
            limiter.admit(profile.class.bucket(), profile.rate_limit)
        };
        let rate = decision.snapshot();
        if let Decision::Denied {
            retry_after_secs, ..
        } = decision
        {
            info!(
                request_id,
                route,
                bucket = profile.class.bucket(),
                retry_after_secs,
                "admission denied"
            );
            return RequestOutcome::new(
                OutcomeKind::RateLimited { retry_after_secs },
                Some(rate),
            );
        }

        // CacheCheck
        let key = cache_key(route, params);
        let cached = {
            let mut cache = self.cache.write().await;
            cache.get(&key)
        };
        if let Some(payload) = cached {
            info!(request_id, route, "cache hit");
            return RequestOutcome::new(
                OutcomeKind::Success {
                    payload,
                    cache: CacheStatus::Hit,
                },
                Some(rate),
            );
        }
        debug!(request_id, route, "cache miss");

        // UpstreamCall: sorted params keep the outbound query deterministic
        let mut query: Vec<(String, String)> = params
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        query.sort();

        match self
            .upstream
            .fetch(&profile.upstream_path, &query, request_id)
            .await
        {
            UpstreamOutcome::Success { payload, .. } => {
                // StoreAndRespond
                {
                    let mut cache = self.cache.write().await;
                    cache.set(key, payload.clone(), profile.cache_ttl);
                }
                info!(
                    request_id,
                    route,
                    ttl = profile.cache_ttl,
                    "upstream payload cached"
                );
                RequestOutcome::new(
                    OutcomeKind::Success {
                        payload,
                        cache: CacheStatus::Miss,
                    },
                    Some(rate),
                )
            }
            UpstreamOutcome::Transient { reason, .. } => {
                warn!(request_id, route, reason = %reason, "upstream unavailable after retries");
                RequestOutcome::new(
                    OutcomeKind::UpstreamUnavailable { reason },
                    Some(rate),
                )
            }
            UpstreamOutcome::Permanent { status, reason } => {
                warn!(request_id, route, status, reason = %reason, "upstream rejected request");
                RequestOutcome::new(
                    OutcomeKind::UpstreamRejected { status, reason },
                    Some(rate),
                )
            }
        }
    }
}
