use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::{
    error::{AppError, AppResult},
    models::{NewProduct, Product},
    AppState,
};

// ── List ──────────────────────────────────────────────────────────────────────

pub async fn list_products(State(state): State<AppState>) -> Json<serde_json::Value> {
    let products = state.products.list();

    info!(count = products.len(), "Listed products");

    Json(serde_json::json!({ "items": products }))
}

// ── Create ────────────────────────────────────────────────────────────────────

/// Decodes the body as JSON regardless of its `Content-Type`.
pub async fn create_product(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let body = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let candidate: NewProduct = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("invalid JSON body: {e}")))?;

    let product = state.products.create(candidate)?;

    info!(id = %product.id, name = %product.name, "Created product");

    Ok((StatusCode::CREATED, Json(product)))
}
