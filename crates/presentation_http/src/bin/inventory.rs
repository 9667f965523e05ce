//! inventory-svc
//!
//! Stock reservation stand-in with a live-adjustable artificial delay.

use infrastructure::{AppConfig, global_tracer, init_telemetry};
use presentation_http::{InventoryState, create_inventory_router, shutdown_signal};
use tokio::net::TcpListener;
use tracing::{info, warn};

const SERVICE_NAME: &str = "inventory-svc";

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

    let state = InventoryState::new(config.inventory.artificial_delay_ms);
    let app = create_inventory_router(state, global_tracer(SERVICE_NAME));

    let addr = config.inventory.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(
        delay_ms = config.inventory.artificial_delay_ms,
        "inventory-svc listening on http://{}", addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.server.shutdown_timeout()))
        .await?;

    info!("inventory-svc shutdown complete");
    Ok(())
}
