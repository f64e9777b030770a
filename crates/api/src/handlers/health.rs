//! Liveness endpoint, probed by the frontend's backend-health check.

use axum::Json;
use serde_json::json;

/// `GET /health` - process is up and serving.
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
