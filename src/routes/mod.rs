//! HTTP routes for Prism
//!
//! This module defines all HTTP endpoints exposed by the gateway.

pub mod chat;
pub mod docs;
pub mod health;
pub mod metrics;

use std::sync::Arc;

use axum::{
    http::{header::HeaderName, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Request headers browsers may send cross-origin
pub const ALLOWED_HEADERS: [&str; 4] = ["authorization", "x-client-info", "apikey", "content-type"];

/// CORS policy: any origin, fixed header list. Preflight gets an empty 200.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(ALLOWED_HEADERS.map(HeaderName::from_static))
}

/// Create the main application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let docs_enabled = state.config.docs_enabled;

    let mut router = Router::new()
        .route("/", post(chat::chat))
        .route("/v1/chat", post(chat::chat))
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .route("/metrics", get(metrics::prometheus_metrics));

    if docs_enabled {
        router = router.merge(docs::create_docs_router());
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}
