use anyhow::{Context, Result};
use devmap::api::{create_app, AppState};
use devmap::config::{load_config, DevmapConfig};
use devmap::seed::seed_demo_data;
use devmap::storage::MemStorage;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "devmap=info,tower_http=info".into()),
        )
        .init();

    info!("devmap starting...");

    let mut config = match std::env::var("DEVMAP_CONFIG") {
        Ok(path) => {
            info!(path = %path, "Loading configuration file");
            load_config(&path)?
        }
        Err(_) => DevmapConfig::default(),
    };
    config.apply_env_overrides();

    let storage = Arc::new(MemStorage::new());
    if config.seed.enabled {
        seed_demo_data(storage.as_ref(), &config.seed, &mut rand::thread_rng());
    } else {
        info!("Demo seeding disabled, starting with an empty store");
    }

    let app = create_app(AppState { storage }, &config.server);

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(addr = %addr, "HTTP API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("devmap stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for ctrl_c signal");
    }
    info!("Shutdown signal received");
}
