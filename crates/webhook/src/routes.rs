//! Inbound webhook routes.
//!
//! The store retries nothing and expects a `200` for every delivered body,
//! so the order route acknowledges unconditionally: the body is archived,
//! then dispatched if it decodes as an order notification, and the internal
//! outcome is only logged.

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use crate::archive::save_raw_payload;
use crate::state::AppState;
use crate::wire::WebhookEnvelope;

/// Build the complete webhook router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/wbuy", get(health_check))
        .route("/wbuy/webhook", post(receive_order))
        .with_state(state)
}

async fn health_check() -> &'static str {
    "wbuy api online"
}

async fn receive_order(State(state): State<AppState>, body: Bytes) -> Json<serde_json::Value> {
    match save_raw_payload(&state.archive_dir, &body).await {
        Ok(path) => tracing::debug!(path = %path.display(), "Archived raw payload"),
        Err(err) => tracing::error!(error = %err, "Failed to archive raw payload"),
    }

    match serde_json::from_slice::<WebhookEnvelope>(&body) {
        Ok(envelope) => {
            let order = envelope.into_order();
            let outcome = state.dispatcher.process_order(&order).await;
            tracing::info!(order_id = %order.id, outcome = %outcome, "Webhook dispatched");
        }
        Err(err) => {
            tracing::warn!(error = %err, "Ignoring payload that is not an order notification");
        }
    }

    Json(json!({ "status": "ok" }))
}
