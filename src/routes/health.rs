use axum::{
    Json, Router,
    routing::get,
};
use serde_json::{json, Value};
use tracing::debug;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(health))
}

async fn health() -> Json<Value> {
    debug!("GET /health - Health check");
    Json(json!({ "status": "ok" }))
}
