//! TechMart storefront API
//!
//! Serves checkout and the chaos administration surface.

use std::sync::Arc;

use infrastructure::{
    AppConfig, HttpDownstreamDelayAdapter, HttpInventoryAdapter, InMemoryFaultRegistry,
    PropagatingHttpClient, global_tracer, init_telemetry, install_metrics_recorder,
};
use presentation_http::{AppState, create_router, shutdown_signal};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

const SERVICE_NAME: &str = "techmart-api";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    let _telemetry = init_telemetry(
        &config.telemetry.clone().for_service(SERVICE_NAME),
        config.server.json_logs(),
    )?;
    if let Some(e) = load_error {
        warn!("Failed to load config, using defaults: {}", e);
    }

    info!("TechMart API v{} starting...", env!("CARGO_PKG_VERSION"));
    info!(
        host = %config.server.host,
        port = %config.server.port,
        inventory_url = %config.downstream.inventory_url,
        "Configuration loaded"
    );

    let client = PropagatingHttpClient::with_config(config.downstream.client_config())
        .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))?;
    let downstream = HttpDownstreamDelayAdapter::new(client.clone(), &config.downstream.inventory_url);
    let inventory = HttpInventoryAdapter::new(client, &config.downstream.inventory_url);

    let tracer = global_tracer(SERVICE_NAME);
    let state = AppState::new(
        Arc::new(InMemoryFaultRegistry::new()),
        Arc::new(downstream),
        Arc::new(inventory),
        config.chaos.random_source(),
        Arc::clone(&tracer),
    );
    let state = match install_metrics_recorder() {
        Ok(handle) => state.with_metrics(handle),
        Err(e) => {
            warn!("Metrics disabled: {}", e);
            state
        },
    };

    let cors_layer = if config.server.allowed_origins.is_empty() {
        // Development mode: allow all origins
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use axum::http::{HeaderValue, Method};
        let origins: Vec<HeaderValue> = config
            .server
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers(Any)
    };

    let app = create_router(state, tracer).layer(cors_layer);

    let addr = config.server.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.server.shutdown_timeout()))
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
