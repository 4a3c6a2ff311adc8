//! OpenAI-compatible wire format
//!
//! Covers OpenAI itself plus Mistral, Groq, OpenRouter, Ollama, LM Studio and
//! any other backend speaking `/chat/completions`.

use serde_json::{json, Map, Value};

use super::{
    bearer_headers, join_path, match_shapes, Extraction, ShapeMatcher, DEFAULT_TEMPERATURE,
    MAX_TOKENS,
};
use crate::gateway::types::{ChatRequest, Failure, WireRequest};

/// Reasoning-style models reject `temperature`
fn accepts_temperature(model: &str) -> bool {
    !model.starts_with("o1-")
}

/// Build a request against the caller's endpoint
pub fn build_request(request: &ChatRequest) -> Result<WireRequest, Failure> {
    build_chat_completion(request.base_endpoint(), &request.model, request)
}

/// Build a `/chat/completions` request for an explicit endpoint and model
pub(crate) fn build_chat_completion(
    endpoint: &str,
    model: &str,
    request: &ChatRequest,
) -> Result<WireRequest, Failure> {
    Ok(WireRequest {
        url: join_path(endpoint, "/chat/completions"),
        headers: bearer_headers(request.credential())?,
        body: chat_completion_body(model, request),
    })
}

fn chat_completion_body(model: &str, request: &ChatRequest) -> Value {
    let mut messages = Vec::with_capacity(request.history.len() + 2);
    messages.push(json!({"role": "system", "content": request.system_prompt}));
    messages.extend(
        request
            .history
            .iter()
            .map(|m| json!({"role": m.role.as_str(), "content": m.content})),
    );
    messages.push(json!({"role": "user", "content": request.user_message}));

    let mut body = Map::new();
    body.insert("model".to_string(), json!(model));
    body.insert("messages".to_string(), Value::Array(messages));
    body.insert("max_tokens".to_string(), json!(MAX_TOKENS));
    if accepts_temperature(model) {
        body.insert("temperature".to_string(), json!(DEFAULT_TEMPERATURE));
    }
    Value::Object(body)
}

pub(crate) fn choice_message_content(body: &Value) -> Option<String> {
    body.pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn choice_text(body: &Value) -> Option<String> {
    body.pointer("/choices/0/text")
        .and_then(Value::as_str)
        .map(str::to_string)
}

const SHAPES: &[ShapeMatcher] = &[
    ShapeMatcher {
        name: "choices.message.content",
        extract: choice_message_content,
    },
    ShapeMatcher {
        name: "choices.text",
        extract: choice_text,
    },
];

pub fn extract_text(body: &Value) -> Extraction {
    match_shapes(body, SHAPES)
}
