//! Upstream failure integration tests
//!
//! Every upstream, transport or parse failure must surface as a 500 with a
//! descriptive message and a stable `kind`.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{chat_body, test_server};
use crate::mocks::{MockProviders, ANTHROPIC_PATH, OPENAI_PATH, ROUTER_PATH};

async fn failing_call(providers: &MockProviders, endpoint: &str, model: &str) -> Value {
    let server = test_server(providers);
    let response = server.post("/v1/chat").json(&chat_body(endpoint, model)).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.json::<Value>()
}

#[tokio::test]
async fn test_model_loading_reports_estimate() {
    let providers = MockProviders::start().await;
    providers
        .mock_json(
            ROUTER_PATH,
            503,
            json!({"error": "Model gpt2 is currently loading", "estimated_time": 42}),
        )
        .await;

    let body = failing_call(
        &providers,
        &providers.huggingface_legacy_endpoint("gpt2"),
        "gpt2",
    )
    .await;

    assert_eq!(body["kind"], "model_loading");
    assert!(body["error"].as_str().unwrap().contains("42"));
}

#[tokio::test]
async fn test_unauthorized_maps_to_upstream_auth() {
    let providers = MockProviders::start().await;
    providers
        .mock_json(
            ANTHROPIC_PATH,
            401,
            json!({"type": "error", "error": {"type": "authentication_error", "message": "invalid x-api-key"}}),
        )
        .await;

    let body = failing_call(&providers, &providers.anthropic_endpoint(), "claude-3-haiku").await;

    assert_eq!(body["kind"], "upstream_auth");
    assert_eq!(body["error"], "invalid x-api-key");
}

#[tokio::test]
async fn test_too_many_requests_maps_to_rate_limit() {
    let providers = MockProviders::start().await;
    providers
        .mock_json(OPENAI_PATH, 429, json!({"error": {"message": "Rate limit reached"}}))
        .await;

    let body = failing_call(&providers, &providers.openai_endpoint(), "gpt-4o").await;

    assert_eq!(body["kind"], "upstream_rate_limit");
    assert_eq!(body["error"], "Rate limit reached");
}

#[tokio::test]
async fn test_error_without_message_names_provider_and_status() {
    let providers = MockProviders::start().await;
    providers.mock_json(OPENAI_PATH, 500, json!({"oops": true})).await;

    let body = failing_call(&providers, &providers.openai_endpoint(), "gpt-4o").await;

    assert_eq!(body["kind"], "upstream_error");
    assert_eq!(body["error"], "OpenAI-compatible API error: 500");
}

#[tokio::test]
async fn test_html_error_page_is_upstream_error() {
    let providers = MockProviders::start().await;
    providers
        .mock_text(OPENAI_PATH, 502, "<html><body>Bad Gateway</body></html>")
        .await;

    let body = failing_call(&providers, &providers.openai_endpoint(), "gpt-4o").await;

    assert_eq!(body["kind"], "upstream_error");
    assert!(body["error"].as_str().unwrap().contains("Bad Gateway"));
}

#[tokio::test]
async fn test_empty_success_body_is_malformed() {
    let providers = MockProviders::start().await;
    providers.mock_text(OPENAI_PATH, 200, "").await;

    let body = failing_call(&providers, &providers.openai_endpoint(), "gpt-4o").await;

    assert_eq!(body["kind"], "malformed_upstream_response");
}

#[tokio::test]
async fn test_non_json_success_body_is_malformed() {
    let providers = MockProviders::start().await;
    providers.mock_text(OPENAI_PATH, 200, "definitely not json").await;

    let body = failing_call(&providers, &providers.openai_endpoint(), "gpt-4o").await;

    assert_eq!(body["kind"], "malformed_upstream_response");
    assert_eq!(body["error"], "definitely not json");
}

#[tokio::test]
async fn test_unrecognized_success_shape_is_no_response() {
    let providers = MockProviders::start().await;
    providers
        .mock_json(ANTHROPIC_PATH, 200, json!({"content": []}))
        .await;
    let server = test_server(&providers);

    let response = server
        .post("/v1/chat")
        .json(&chat_body(&providers.anthropic_endpoint(), "claude-3-haiku"))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["response"], "No response");
}

#[tokio::test]
async fn test_unreachable_upstream_is_network_error() {
    let providers = MockProviders::start().await;

    // Nothing listens on port 1
    let body = failing_call(&providers, "http://127.0.0.1:1/v1", "gpt-4o").await;

    assert_eq!(body["kind"], "network_error");
    assert_eq!(providers.request_count().await, 0);
}
