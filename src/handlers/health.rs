use axum::{response::Json, routing::get, Router};
use serde_json::json;

use crate::state::AppState;

/// Declared with absolute paths and merged (not nested) in main: a nested
/// router never matches its bare "/" under the `/api` prefix.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/", get(root))
        .route("/api/health", get(health_check))
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Aradaki Fark API - Car Comparison Platform"
    }))
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "message": "Car comparison API is healthy"
    }))
}
