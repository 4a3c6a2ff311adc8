//! Documentation endpoint
//!
//! Serves the raw OpenAPI document. Disabled with `DOCS_ENABLED=false`.

use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

use crate::docs::GatewayApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(GatewayApiDoc::openapi())
}

/// Create the docs router
///
/// Generic over state type S so it merges into routers with any state.
pub fn create_docs_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/docs/openapi.json", get(openapi_json))
}
