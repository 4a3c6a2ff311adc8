//! OpenAPI specification for the gateway API

use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::gateway::{ChatRequest, ErrorKind, HistoryMessage, HistoryRole};
use crate::routes::chat::ChatResponse;

/// OpenAPI specification for the Prism gateway
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Prism Gateway API",
        version = "1.0.0",
        description = "Send a prompt to OpenAI-compatible, Anthropic, Google, Cohere or HuggingFace endpoints through one request shape"
    ),
    paths(crate::routes::chat::chat),
    components(schemas(
        HistoryRole,
        HistoryMessage,
        ChatRequest,
        ChatResponse,
        ErrorKind,
        ErrorResponse,
    )),
    tags(
        (name = "Chat", description = "Gateway chat endpoint")
    )
)]
pub struct GatewayApiDoc;
