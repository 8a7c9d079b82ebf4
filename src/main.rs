//! listcache - A typed list cache over Redis
//!
//! Serves the demo endpoints over a Redis (or in-memory) list store.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use listcache::api::create_router;
use listcache::store::MemoryStore;
use listcache::{spawn_cleanup_task, AppState, BackendKind, CacheClient, CacheFacade, Config};

/// Main entry point for the listcache server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Build the cache client for the configured backend
/// 4. Start background TTL cleanup task (memory backend only)
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "listcache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting listcache server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: backend={:?}, list_write_mode={:?}, port={}",
        config.backend, config.list_write_mode, config.server_port
    );

    let (client, cleanup_handle) = match config.backend {
        BackendKind::Redis => {
            let client = CacheClient::redis(&config.redis_url)
                .await
                .with_context(|| format!("failed to connect to Redis at {}", config.redis_url))?;
            (client, None)
        }
        BackendKind::Memory => {
            let store = Arc::new(MemoryStore::new());
            let handle = spawn_cleanup_task(store.clone(), config.cleanup_interval);
            info!("Background cleanup task started");
            (CacheClient::memory(store), Some(handle))
        }
    };
    info!("Cache client initialized");

    let state = AppState::new(CacheFacade::new(client, config.list_write_mode));
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the cleanup task if one is running.
async fn shutdown_signal(cleanup_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
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

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Cleanup task aborted");
    }
}
