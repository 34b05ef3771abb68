pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;

use std::sync::Arc;

use axum::{body::Body, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    map_request_body::MapRequestBodyLayer,
    timeout::{RequestBodyTimeoutLayer, TimeoutBody, TimeoutLayer},
    trace::TraceLayer,
};

use crate::config::Config;
use crate::repository::ProductRepository;

/// Shared application state. Cheap to clone, the repository sits behind an Arc.
#[derive(Clone)]
pub struct AppState {
    pub products: Arc<dyn ProductRepository>,
}

impl AppState {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    Router::new()
        // ── Health ──────────────────────────────────────────────────────────
        .route("/healthz/live", get(handlers::health))
        .route("/healthz/ready", get(handlers::health))
        .route("/health", get(handlers::health))

        // ── Products ────────────────────────────────────────────────────────
        .route(
            "/v1/products",
            get(handlers::products::list_products).post(handlers::products::create_product),
        )

        // ── Middleware ──────────────────────────────────────────────────────
        .layer(
            ServiceBuilder::new()
                .layer(RequestBodyTimeoutLayer::new(config.read_timeout))
                .layer(MapRequestBodyLayer::new(Body::new::<TimeoutBody<Body>>)),
        )
        .layer(TimeoutLayer::new(config.write_timeout))
        .layer(CatchPanicLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
