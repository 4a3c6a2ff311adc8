//! Gateway endpoint integration tests
//!
//! Drives POST /v1/chat through the real router against mocked providers and
//! checks both the wire request each provider received and the reply.

use axum::http::StatusCode;
use base64::{engine::general_purpose, Engine as _};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{chat_body, constants, test_server};
use crate::mocks::{MockProviders, ANTHROPIC_PATH, COHERE_PATH, OPENAI_PATH, ROUTER_PATH};

#[tokio::test]
async fn test_openai_compatible_round_trip() {
    let providers = MockProviders::start().await;
    providers.mock_openai_reply("I'm doing well!").await;
    let server = test_server(&providers);

    let mut body = chat_body(&providers.openai_endpoint(), "gpt-4o");
    body["history"] = json!([
        {"role": "user", "content": "earlier question"},
        {"role": "assistant", "content": "earlier answer"}
    ]);

    let response = server.post("/v1/chat").json(&body).await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({"response": "I'm doing well!"}));

    let sent = providers.received_bodies(OPENAI_PATH).await;
    assert_eq!(
        sent[0],
        json!({
            "model": "gpt-4o",
            "messages": [
                {"role": "system", "content": constants::TEST_SYSTEM_PROMPT},
                {"role": "user", "content": "earlier question"},
                {"role": "assistant", "content": "earlier answer"},
                {"role": "user", "content": constants::TEST_USER_MESSAGE}
            ],
            "max_tokens": 4096,
            "temperature": 0.7
        })
    );
    assert_eq!(
        providers.last_header(OPENAI_PATH, "authorization").await,
        Some(format!("Bearer {}", constants::TEST_API_KEY))
    );
}

#[tokio::test]
async fn test_anthropic_system_prompt_is_top_level() {
    let providers = MockProviders::start().await;
    providers.mock_anthropic_reply("Hi from Claude").await;
    let server = test_server(&providers);

    let response = server
        .post("/v1/chat")
        .json(&chat_body(&providers.anthropic_endpoint(), "claude-3-haiku"))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["response"], "Hi from Claude");

    let sent = providers.received_bodies(ANTHROPIC_PATH).await;
    assert_eq!(sent[0]["system"], constants::TEST_SYSTEM_PROMPT);
    let messages = sent[0]["messages"].as_array().unwrap();
    assert!(messages.iter().all(|m| m["role"] != "system"));
    assert_eq!(messages.len(), 1);
    assert_eq!(
        providers.last_header(ANTHROPIC_PATH, "x-api-key").await,
        Some(constants::TEST_API_KEY.to_string())
    );
    assert_eq!(providers.last_header(ANTHROPIC_PATH, "authorization").await, None);
}

#[tokio::test]
async fn test_google_round_trip() {
    let providers = MockProviders::start().await;
    providers
        .mock_google_reply("gemini-1.5-flash", constants::TEST_API_KEY, "Bonjour")
        .await;
    let server = test_server(&providers);

    let mut body = chat_body(&providers.google_endpoint(), "gemini-1.5-flash");
    body["history"] = json!([{"role": "assistant", "content": "previous"}]);

    let response = server.post("/v1/chat").json(&body).await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["response"], "Bonjour");

    let sent = providers
        .received_bodies(&MockProviders::google_path("gemini-1.5-flash"))
        .await;
    assert_eq!(
        sent[0]["systemInstruction"],
        json!({"parts": [{"text": constants::TEST_SYSTEM_PROMPT}]})
    );
    assert_eq!(sent[0]["contents"][0]["role"], "model");
    assert_eq!(sent[0]["contents"][1]["role"], "user");
    assert_eq!(sent[0]["generationConfig"]["maxOutputTokens"], 4096);
}

#[tokio::test]
async fn test_cohere_round_trip() {
    let providers = MockProviders::start().await;
    providers.mock_cohere_reply("Cohere says hi").await;
    let server = test_server(&providers);

    let mut body = chat_body(&providers.cohere_endpoint(), "command-r");
    body["history"] = json!([
        {"role": "user", "content": "q"},
        {"role": "assistant", "content": "a"}
    ]);

    let response = server.post("/v1/chat").json(&body).await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["response"], "Cohere says hi");

    let sent = providers.received_bodies(COHERE_PATH).await;
    assert_eq!(sent[0]["message"], constants::TEST_USER_MESSAGE);
    assert_eq!(sent[0]["preamble"], constants::TEST_SYSTEM_PROMPT);
    assert_eq!(
        sent[0]["chat_history"],
        json!([
            {"role": "USER", "message": "q"},
            {"role": "CHATBOT", "message": "a"}
        ])
    );
}

#[tokio::test]
async fn test_huggingface_legacy_url_is_rewritten_to_router() {
    let providers = MockProviders::start().await;
    providers.mock_router_reply("gpt2 says hi").await;
    let server = test_server(&providers);

    let response = server
        .post("/v1/chat")
        .json(&chat_body(
            &providers.huggingface_legacy_endpoint("gpt2"),
            "whatever",
        ))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["response"], "gpt2 says hi");

    let sent = providers.received_bodies(ROUTER_PATH).await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0]["model"], "gpt2");
}

#[tokio::test]
async fn test_loopback_without_api_key_sends_no_authorization() {
    let providers = MockProviders::start().await;
    providers.mock_openai_reply("local model reply").await;
    let server = test_server(&providers);

    let mut body = chat_body(&providers.openai_endpoint(), "llama3");
    body.as_object_mut().unwrap().remove("apiKey");

    let response = server.post("/v1/chat").json(&body).await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["response"], "local model reply");
    assert_eq!(providers.last_header(OPENAI_PATH, "authorization").await, None);
}

#[tokio::test]
async fn test_stealth_mode_encodes_user_message() {
    let providers = MockProviders::start().await;
    providers.mock_openai_reply("decoded and answered").await;
    let server = test_server(&providers);

    let mut body = chat_body(&providers.openai_endpoint(), "gpt-4o");
    body["userMessage"] = json!("hello");
    body["stealthMode"] = json!(true);

    let response = server.post("/v1/chat").json(&body).await;
    response.assert_status_ok();

    let sent = providers.received_bodies(OPENAI_PATH).await;
    let messages = sent[0]["messages"].as_array().unwrap();
    assert_eq!(
        messages.last().unwrap()["content"],
        general_purpose::STANDARD.encode("hello")
    );
    let system = messages[0]["content"].as_str().unwrap();
    assert!(system.starts_with(prism::gateway::stealth::DECODE_INSTRUCTION));
    assert!(system.ends_with(constants::TEST_SYSTEM_PROMPT));
}

#[tokio::test]
async fn test_legacy_field_names_are_accepted() {
    let providers = MockProviders::start().await;
    providers.mock_anthropic_reply("legacy ok").await;
    let server = test_server(&providers);

    let response = server
        .post("/")
        .json(&json!({
            "apiKey": constants::TEST_API_KEY,
            "apiEndpoint": providers.anthropic_endpoint(),
            "model": "claude-3-haiku",
            "jailbreakPrompt": "legacy system",
            "conversationHistory": [],
            "userMessage": "hi",
            "stealthMode": false
        }))
        .await;

    response.assert_status_ok();
    let sent = providers.received_bodies(ANTHROPIC_PATH).await;
    assert_eq!(sent[0]["system"], "legacy system");
}

#[tokio::test]
async fn test_missing_fields_are_bad_request() {
    let providers = MockProviders::start().await;
    let server = test_server(&providers);

    let mut body = chat_body(&providers.openai_endpoint(), "gpt-4o");
    body["model"] = json!("");

    let response = server.post("/v1/chat").json(&body).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "Missing required fields: endpointUrl or model"
    );
    assert_eq!(providers.request_count().await, 0);
}

#[tokio::test]
async fn test_invalid_json_is_bad_request() {
    let providers = MockProviders::start().await;
    let server = test_server(&providers);

    let response = server
        .post("/v1/chat")
        .content_type("application/json")
        .bytes("{not json".into())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request body"));
}

#[tokio::test]
async fn test_missing_credential_for_remote_provider_is_bad_request() {
    let providers = MockProviders::start().await;
    let server = test_server(&providers);

    let mut body = chat_body(&providers.anthropic_endpoint(), "claude-3-haiku");
    body["apiKey"] = json!("");

    let response = server.post("/v1/chat").json(&body).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json = response.json::<Value>();
    assert_eq!(json["kind"], "missing_credential");
    assert_eq!(providers.request_count().await, 0);
}
