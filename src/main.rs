//! Customer Cache - customer record service with a cache-aside layer
//!
//! # Startup Sequence
//! 1. Initialize tracing subscriber for logging
//! 2. Load configuration from environment variables
//! 3. Open the customer store
//! 4. Connect the cache backend, falling back to no caching if Redis is down
//! 5. Start the TTL sweep when caching in memory
//! 6. Serve the Axum router until SIGINT/SIGTERM

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use customer_cache::api::{create_router, AppState};
use customer_cache::cache::{CacheAside, CacheBackend, MemoryBackend, NoopBackend, RedisBackend};
use customer_cache::config::{BackendKind, Config};
use customer_cache::store::{CustomerStore, MemoryStore};
use customer_cache::{spawn_cleanup_task, CustomerService, TtlPolicy};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "customer_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting customer service");

    let config = Config::from_env();
    info!(
        "Configuration loaded: backend={:?}, namespace={}, ttl={}s, countries_ttl={}s, port={}",
        config.cache_backend,
        config.cache_namespace,
        config.cache_ttl,
        config.countries_ttl,
        config.server_port
    );

    let store: Arc<dyn CustomerStore> = if config.seed_data {
        Arc::new(MemoryStore::seeded())
    } else {
        Arc::new(MemoryStore::with_countries())
    };

    let (backend, cleanup_handle) = connect_backend(&config).await;
    info!("Cache backend ready: {}", backend.name());

    let service = CustomerService::new(
        store,
        CacheAside::new(backend),
        TtlPolicy::from_config(&config),
    );
    let app = create_router(AppState::new(service));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("serving HTTP")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Builds the configured backend. An unreachable Redis degrades to
/// `NoopBackend` so every read goes to the store instead of failing.
async fn connect_backend(config: &Config) -> (Arc<dyn CacheBackend>, Option<JoinHandle<()>>) {
    match config.cache_backend {
        BackendKind::Memory => {
            let memory = MemoryBackend::new(config.cache_namespace.clone());
            let handle = spawn_cleanup_task(&memory, config.cleanup_interval);
            (Arc::new(memory), Some(handle))
        }
        BackendKind::Redis => {
            match RedisBackend::connect(
                &config.redis_url,
                config.cache_namespace.clone(),
                config.redis_timeout_ms,
            )
            .await
            {
                Ok(redis) => (Arc::new(redis), None),
                Err(err) => {
                    warn!(error = %err, url = %config.redis_url, "Redis unreachable, caching disabled");
                    (Arc::new(NoopBackend), None)
                }
            }
        }
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then stops the sweep task.
async fn shutdown_signal(cleanup_handle: Option<JoinHandle<()>>) {
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

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Cleanup task aborted");
    }
}
