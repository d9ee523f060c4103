//! WbuyCourier webhook server binary entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use courier_common::config::AppConfig;
use courier_dispatch::{Dispatcher, ProcessedOrders};
use courier_gateway::GatewayClient;

use courier_webhook::routes::create_router;
use courier_webhook::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("courier_webhook=debug,courier_dispatch=debug,tower_http=debug")
        }))
        .init();

    tracing::info!("Starting WbuyCourier webhook server...");

    // Load configuration
    let config = AppConfig::from_env()?;
    if config.gateway_token.is_none() {
        tracing::warn!("No gateway token configured — every dispatch will fail");
    }
    if let Some(number) = &config.test_number {
        tracing::warn!(%number, "Test override number active — all messages go to it");
    }

    // Build the dispatch pipeline
    let gateway = GatewayClient::from_config(&config)?;
    let ledger = ProcessedOrders::new(config.ledger_path.clone());
    let dispatcher = Dispatcher::new(
        gateway,
        ledger,
        Duration::from_millis(config.send_pause_ms),
        config.test_number.clone(),
    );

    let state = AppState::new(Arc::new(dispatcher), config.archive_dir.clone());

    // Build router
    let app = create_router(state).layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.bind_port));
    tracing::info!("Webhook server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
