//! Cohere chat wire format

use serde_json::{json, Value};

use super::{
    bearer_headers, join_path, join_text_parts, match_shapes, required_key, Extraction,
    ShapeMatcher,
};
use crate::gateway::types::{ChatRequest, Failure, HistoryRole, WireRequest};

pub fn build_request(request: &ChatRequest) -> Result<WireRequest, Failure> {
    let api_key = required_key(request)?;

    let chat_history: Vec<Value> = request
        .history
        .iter()
        .map(|m| {
            let role = match m.role {
                HistoryRole::Assistant => "CHATBOT",
                HistoryRole::User => "USER",
            };
            json!({"role": role, "message": m.content})
        })
        .collect();

    Ok(WireRequest {
        url: join_path(request.base_endpoint(), "/chat"),
        headers: bearer_headers(Some(api_key))?,
        body: json!({
            "model": request.model,
            "message": request.user_message,
            "preamble": request.system_prompt,
            "chat_history": chat_history,
        }),
    })
}

fn v1_text(body: &Value) -> Option<String> {
    body.get("text").and_then(Value::as_str).map(str::to_string)
}

fn v2_message_content(body: &Value) -> Option<String> {
    join_text_parts(body.pointer("/message/content")?)
}

const SHAPES: &[ShapeMatcher] = &[
    ShapeMatcher {
        name: "text",
        extract: v1_text,
    },
    ShapeMatcher {
        name: "message.content",
        extract: v2_message_content,
    },
];

pub fn extract_text(body: &Value) -> Extraction {
    match_shapes(body, SHAPES)
}
