//! Service status route.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/status", get(status))
}

/// GET /api/status — service heartbeat.
async fn status(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let session = state.session.read();

    Json(serde_json::json!({
        "service": "tablemask",
        "port": state.config.port,
        "tableLoaded": session.is_some(),
        "resultReady": session
            .as_ref()
            .map(|s| s.result.is_some())
            .unwrap_or(false),
    }))
}
