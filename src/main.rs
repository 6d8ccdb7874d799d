//! Pitchside - A caching, rate-limiting gateway for football data
//!
//! Sits between API clients and an upstream REST data provider, shielding
//! the provider's quota with per-route-class rate limits and a TTL response
//! cache, and hiding provider instability behind bounded retries.

mod api;
mod cache;
mod config;
mod error;
mod gateway;
mod limit;
mod models;
mod tasks;
mod upstream;

use std::net::SocketAddr;

use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{create_router, AppState};
use config::Config;
use tasks::spawn_cleanup_task;

/// Main entry point for the gateway.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load and validate configuration from environment variables
/// 3. Create pipeline state (cache, limiter, upstream client)
/// 4. Start the background hygiene sweep task
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pitchside=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Pitchside Gateway");

    // Load and validate configuration; the gateway refuses to start without
    // an upstream credential
    let config = Config::from_env();
    if let Err(err) = config.validate() {
        error!("Configuration error: {}", err);
        std::process::exit(1);
    }
    info!(
        "Configuration loaded: upstream={}, ttl_static={}s, ttl_live={}s, limits={}/{} per {}s",
        config.upstream_base_url,
        config.cache_ttl_static,
        config.cache_ttl_live,
        config.rate_limit_static,
        config.rate_limit_live,
        config.rate_window_secs
    );

    // Create application state: cache, limiter, upstream client, pipeline
    let state = AppState::from_config(&config)?;
    info!("Pipeline initialized");

    // Start background hygiene sweep
    let cleanup_handle = spawn_cleanup_task(
        state.cache.clone(),
        state.limiter.clone(),
        config.cleanup_interval,
    );
    info!("Background sweep task started");

    // Create router with all endpoints
    let app = create_router(state);

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the sweep task and allows graceful shutdown.
async fn shutdown_signal(cleanup_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    // Abort the sweep task
    cleanup_handle.abort();
    warn!("Sweep task aborted");
}
