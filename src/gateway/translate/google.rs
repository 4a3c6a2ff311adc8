//! Google Gemini `generateContent` wire format

use reqwest::Url;
use serde_json::{json, Value};

use super::{
    join_text_parts, json_headers, match_shapes, required_key, Extraction, ShapeMatcher,
    DEFAULT_TEMPERATURE, MAX_TOKENS,
};
use crate::gateway::types::{ChatRequest, ErrorKind, Failure, HistoryRole, WireRequest};

const GENERATE_CONTENT: &str = ":generateContent";

/// Resolve the `generateContent` URL for whatever form of endpoint was given.
///
/// The key is appended as a percent-encoded `key` query pair, after any query
/// the endpoint already carries.
fn generate_content_url(endpoint: &str, model: &str, api_key: &str) -> Result<String, Failure> {
    let base = if endpoint.contains(GENERATE_CONTENT) {
        endpoint.to_string()
    } else if endpoint.contains("/models/") {
        format!("{}{}", endpoint, GENERATE_CONTENT)
    } else {
        format!("{}/models/{}{}", endpoint, model, GENERATE_CONTENT)
    };

    let mut url = Url::parse(&base).map_err(|e| {
        Failure::new(
            ErrorKind::NetworkError,
            format!("Invalid Google endpoint URL: {}", e),
        )
    })?;
    url.query_pairs_mut().append_pair("key", api_key);

    Ok(url.into())
}

pub fn build_request(request: &ChatRequest) -> Result<WireRequest, Failure> {
    let api_key = required_key(request)?;

    let mut contents: Vec<Value> = request
        .history
        .iter()
        .map(|m| {
            let role = match m.role {
                HistoryRole::Assistant => "model",
                HistoryRole::User => "user",
            };
            json!({"role": role, "parts": [{"text": m.content}]})
        })
        .collect();
    contents.push(json!({"role": "user", "parts": [{"text": request.user_message}]}));

    Ok(WireRequest {
        url: generate_content_url(request.base_endpoint(), &request.model, api_key)?,
        headers: json_headers(),
        body: json!({
            "systemInstruction": {"parts": [{"text": request.system_prompt}]},
            "contents": contents,
            "generationConfig": {
                "maxOutputTokens": MAX_TOKENS,
                "temperature": DEFAULT_TEMPERATURE,
            },
        }),
    })
}

fn candidate_parts(body: &Value) -> Option<String> {
    join_text_parts(body.pointer("/candidates/0/content/parts")?)
}

const SHAPES: &[ShapeMatcher] = &[ShapeMatcher {
    name: "candidates.content.parts",
    extract: candidate_parts,
}];

pub fn extract_text(body: &Value) -> Extraction {
    match_shapes(body, SHAPES)
}
