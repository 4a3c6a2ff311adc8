//! Gateway chat endpoint
//!
//! Validates the request shape, runs one gateway call and maps the result to
//! `{"response": ...}` or an error body.

use std::sync::Arc;

use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult, ErrorResponse},
    gateway::{ChatRequest, ChatResult},
    AppState,
};

/// Successful reply
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    /// Reply text from the upstream model
    #[schema(example = "Hello! How can I help you today?")]
    pub response: String,
}

/// Reject requests the gateway cannot act on
pub fn validate(request: &ChatRequest) -> AppResult<()> {
    if request.endpoint_url.trim().is_empty() || request.model.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Missing required fields: endpointUrl or model".to_string(),
        ));
    }

    let url = Url::parse(request.endpoint_url.trim())
        .map_err(|e| AppError::BadRequest(format!("Invalid endpoint URL: {}", e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::BadRequest(format!(
            "Invalid endpoint URL: unsupported scheme '{}'",
            url.scheme()
        )));
    }

    Ok(())
}

/// Send a prompt to the configured provider
///
/// The wire protocol is chosen from `endpointUrl`. Missing fields and missing
/// credentials are 400; every upstream, transport or parse failure is 500.
#[utoipa::path(
    post,
    path = "/v1/chat",
    tag = "Chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Reply text", body = ChatResponse),
        (status = 400, description = "Invalid request or missing API key", body = ErrorResponse),
        (status = 500, description = "Upstream, transport or parse failure", body = ErrorResponse)
    )
)]
pub async fn chat(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> AppResult<(StatusCode, Json<ChatResponse>)> {
    let request: ChatRequest = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e)))?;

    validate(&request).inspect_err(|e| {
        warn!(error = %e, "Rejected chat request");
    })?;

    info!(
        model = %request.model,
        history = request.history.len(),
        stealth = request.stealth_mode,
        "Processing chat request"
    );

    match state.gateway.execute(request).await {
        ChatResult::Success { text } => Ok((StatusCode::OK, Json(ChatResponse { response: text }))),
        ChatResult::Failure(failure) => Err(failure.into()),
    }
}
