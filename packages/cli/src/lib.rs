// ABOUTME: Server bootstrap for the Project Sleep API
// ABOUTME: Builds the catalog store from configuration and serves the router with its layers

use anyhow::Context;
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use sleep_api::{create_router, AdminAuth, AppState};
use sleep_config::RUST_LOG;
use sleep_storage::{CatalogStore, InMemoryStore, RemoteStore};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub mod client_state;
pub mod config;
pub mod middleware;

#[cfg(test)]
mod tests;

use config::{Config, StoreBackend};

/// Install the tracing subscriber. `RUST_LOG` wins over `default_directive`.
pub fn init_tracing(default_directive: &str) {
    let filter = EnvFilter::try_from_env(RUST_LOG)
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    // A second init (e.g. in tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Build the catalog backend selected by the configuration
pub fn build_store(config: &Config) -> anyhow::Result<Arc<dyn CatalogStore>> {
    let store: Arc<dyn CatalogStore> = match config.store_backend {
        StoreBackend::Memory => {
            info!(
                latency_ms = config.mock_latency.as_millis() as u64,
                policy = ?config.status_policy,
                "Using seeded in-memory catalog"
            );
            Arc::new(
                InMemoryStore::seeded()
                    .with_latency(config.mock_latency)
                    .with_policy(config.status_policy),
            )
        }
        StoreBackend::Remote => {
            info!(url = %config.remote_url, "Using remote catalog");
            let mut remote = RemoteStore::new(&config.remote_url)
                .with_context(|| format!("Invalid remote URL: {}", config.remote_url))?;
            // Upstream writes reuse the configured admin token
            if let Some(token) = &config.admin_token {
                remote = remote.with_token(token.clone());
            }
            Arc::new(remote)
        }
    };

    Ok(store)
}

/// Build the full application: API routes plus tracing, panic and CORS layers
pub fn build_app(config: &Config) -> anyhow::Result<Router> {
    let store = build_store(config)?;
    let auth = AdminAuth::new(
        config.admin_email.clone(),
        &config.admin_password,
        config.admin_token.clone(),
    );
    let state = AppState::new(store, auth);

    let cors = CorsLayer::new()
        .allow_origin(
            config
                .cors_origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS origin: {}", config.cors_origin))?,
        )
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Ok(create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::create_panic_handler())
        .layer(cors))
}

pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let app = build_app(&config)?;
    let addr = SocketAddr::new(config.host, config.port);

    info!(cors_origin = %config.cors_origin, "Starting Project Sleep API");
    if config.admin_token.is_none() {
        info!("No admin token configured, generated one for this process");
    }

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
