//! Entry point for the `superheroes-gateway` HTTP server.

use std::sync::Arc;

use superheroes_gateway::{
    config::GatewayConfig,
    routes::{create_router, AppState},
};
use superheroes_store::{seed::seed_demo_data, SqliteRepository, StoreConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match GatewayConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let repo = match SqliteRepository::connect(&StoreConfig::new(config.database_url.clone())).await {
        Ok(r) => r,
        Err(e) => {
            tracing::error!(url = %config.database_url, error = %e, "failed to open store");
            std::process::exit(1);
        }
    };

    if config.seed {
        if let Err(e) = seed_demo_data(&repo).await {
            tracing::error!(error = %e, "failed to seed store");
            std::process::exit(1);
        }
    }

    let app = create_router(AppState::new(Arc::new(repo), config.status_policy));

    let listener = match tokio::net::TcpListener::bind(config.listen_addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %config.listen_addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    info!(addr = %config.listen_addr, policy = ?config.status_policy, "superheroes-gateway listening");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}
