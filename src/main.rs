//! Message Audit - deleted and edited message logger
//!
//! Receives message events over HTTP, caches message snapshots and logs
//! audit records for deletes and edits.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use message_audit::api::create_router;
use message_audit::audit::TracingSink;
use message_audit::{spawn_stats_reporter, AppState, Config, MessageCache};

/// Main entry point for the audit service.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the snapshot cache with the configured capacity
/// 4. Start the background stats reporter
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "message_audit=info,audit=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting message audit service");

    let config = Config::from_env().context("failed to load configuration")?;
    info!(
        "Configuration loaded: cache_capacity={}, port={}, stats_interval={}s",
        config.cache_capacity, config.server_port, config.stats_interval
    );

    let cache = Arc::new(
        MessageCache::new(config.cache_capacity).context("failed to create snapshot cache")?,
    );
    info!("Snapshot cache initialized");

    let reporter = (config.stats_interval > 0)
        .then(|| spawn_stats_reporter(cache.clone(), config.stats_interval));

    let app = create_router(AppState::new(cache, Arc::new(TracingSink)));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(reporter))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the stats reporter and allows graceful shutdown.
async fn shutdown_signal(reporter: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
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

    if let Some(handle) = reporter {
        handle.abort();
        warn!("Stats reporter aborted");
    }
}
