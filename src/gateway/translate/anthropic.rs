//! Anthropic Messages API wire format
//!
//! The system prompt goes in the top-level `system` field, never as a message.

use reqwest::header::HeaderValue;
use serde_json::{json, Value};

use super::{
    credential_header, join_path, json_headers, match_shapes, required_key, Extraction,
    ShapeMatcher, MAX_TOKENS,
};
use crate::gateway::types::{ChatRequest, Failure, HistoryRole, WireRequest};

pub const ANTHROPIC_VERSION: &str = "2023-06-01";

pub fn build_request(request: &ChatRequest) -> Result<WireRequest, Failure> {
    let api_key = required_key(request)?;

    let mut headers = json_headers();
    headers.insert("x-api-key", credential_header(api_key)?);
    headers.insert("anthropic-version", HeaderValue::from_static(ANTHROPIC_VERSION));

    let mut messages: Vec<Value> = request
        .history
        .iter()
        .map(|m| {
            let role = match m.role {
                HistoryRole::Assistant => "assistant",
                HistoryRole::User => "user",
            };
            json!({"role": role, "content": m.content})
        })
        .collect();
    messages.push(json!({"role": "user", "content": request.user_message}));

    Ok(WireRequest {
        url: join_path(request.base_endpoint(), "/messages"),
        headers,
        body: json!({
            "model": request.model,
            "max_tokens": MAX_TOKENS,
            "system": request.system_prompt,
            "messages": messages,
        }),
    })
}

fn first_text_block(body: &Value) -> Option<String> {
    body.get("content")?
        .as_array()?
        .iter()
        .find_map(|block| block.get("text").and_then(Value::as_str))
        .map(str::to_string)
}

const SHAPES: &[ShapeMatcher] = &[ShapeMatcher {
    name: "content.text",
    extract: first_text_block,
}];

pub fn extract_text(body: &Value) -> Extraction {
    match_shapes(body, SHAPES)
}
