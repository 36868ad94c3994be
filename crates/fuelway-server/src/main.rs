//! Fuelway server - fuel-stop planning backend

use anyhow::Result;
use axum::routing::get;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fuelway_ors::RoutingClient;
use fuelway_server::api;
use fuelway_server::config::Config;
use fuelway_server::persistence;
use fuelway_server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fuelway_server=debug".parse()?),
        )
        .init();

    tracing::info!("Starting fuelway server...");

    let config = Config::from_env();
    let port = config.server_port;

    let db = persistence::init_database(&config.database_path, config.database_max_connections)
        .await?;

    let routing = Arc::new(RoutingClient::new(
        &config.ors_base_url,
        &config.ors_api_key,
        Duration::from_secs(config.routing_timeout_secs),
    )?);

    let state = Arc::new(AppState::new(db, config, routing));
    state.load_from_database().await?;

    // Build the app
    let app = api::routes()
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
        .layer(CorsLayer::permissive());

    // Run server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
