pub mod products;

use axum::{http::StatusCode, Json};
use serde_json::json;

/// Liveness and readiness probe. Does not consult the repository.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::OK, Json(json!({ "status": "OK" })))
}
