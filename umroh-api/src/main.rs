use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use umroh_api::{app, AppState, RouterConfig};
use umroh_core::DocumentStore;
use umroh_store::app_config::{Config, DatabaseConfig, StoreBackend};
use umroh_store::{DbClient, HttpIdentityVerifier, MemoryStore, PgDocumentStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "umroh_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting Umroh API on port {}", config.server.port);

    let store = open_store(&config.database).await?;

    let verifier = HttpIdentityVerifier::new(
        &config.auth.identity_url,
        Duration::from_secs(config.auth.request_timeout_secs),
    )
    .context("Failed to build identity client")?;

    let app_state = AppState::new(
        store.clone(),
        Arc::new(verifier),
        chrono::Duration::days(config.auth.session_ttl_days),
    );

    if config.cors.allowed_origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS allows any origin");
    }

    let app = app(
        app_state,
        &RouterConfig {
            prefix: config.api.prefix.clone(),
            allowed_origins: config.cors.allowed_origins.clone(),
        },
    );

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    Ok(())
}

async fn open_store(database: &DatabaseConfig) -> anyhow::Result<Arc<dyn DocumentStore>> {
    match database.backend {
        StoreBackend::Postgres => {
            let db = DbClient::new(database).await.context("Failed to connect to Postgres")?;
            db.migrate().await.context("Failed to run migrations")?;
            Ok(Arc::new(PgDocumentStore::new(db.pool)))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store, data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
