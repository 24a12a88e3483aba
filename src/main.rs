use std::sync::Arc;

use anyhow::Context;
use axum::extract::Request;
use tracing_subscriber::EnvFilter;

use lmanager_api::app::{app, AppState};
use lmanager_api::auth::providers::ProviderRegistry;
use lmanager_api::config::AppConfig;
use lmanager_api::database::{MemoryStore, PgStore, Store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let config = AppConfig::from_env();
    config.validate()?;
    tracing::info!("Starting LManager API in {:?} mode", config.environment);

    let providers = ProviderRegistry::load(config.auth_providers_file.as_deref())
        .context("failed to load login providers")?;

    let pg = match config.database.url {
        Some(_) => Some(PgStore::connect(&config.database).await?),
        None => None,
    };
    let store: Arc<dyn Store> = match &pg {
        Some(pg) => Arc::new(pg.clone()),
        None => {
            tracing::warn!("DATABASE_URL not set, using the in-memory store");
            Arc::new(MemoryStore::new())
        }
    };

    let bind_addr = config.bind_addr();
    let app = app(AppState::new(config, store, providers));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("LManager API listening on http://{}", bind_addr);

    axum::serve(listener, axum::ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pg) = pg {
        pg.close().await;
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
