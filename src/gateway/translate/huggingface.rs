//! HuggingFace wire format
//!
//! HuggingFace serves chat through its OpenAI-compatible router. Legacy
//! per-model inference URLs are rewritten to the router, taking the model id
//! from the URL. Responses are matched against the router shape first and then
//! the task-specific inference shapes.

use serde_json::Value;

use super::openai::{build_chat_completion, choice_message_content};
use super::{match_shapes, required_key, BuildContext, Extraction, ShapeMatcher};
use crate::gateway::types::{ChatRequest, Failure, WireRequest};

const LEGACY_INFERENCE_HOST: &str = "api-inference.huggingface.co";
const LEGACY_MODELS_PATH: &str = "/models/";

/// OpenAI-compatible paths a legacy model URL may carry after the model id
const OPENAI_PATH_SUFFIXES: [&str; 3] = ["/v1/chat/completions", "/chat/completions", "/v1"];

/// Model id embedded in a legacy per-model inference URL
pub fn legacy_model_id(endpoint: &str) -> Option<&str> {
    if !endpoint.to_ascii_lowercase().contains(LEGACY_INFERENCE_HOST) {
        return None;
    }

    let (_, rest) = endpoint.split_once(LEGACY_MODELS_PATH)?;
    let mut model = rest
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim_matches('/');

    if let Some(stripped) = OPENAI_PATH_SUFFIXES
        .iter()
        .find_map(|suffix| model.strip_suffix(suffix))
    {
        model = stripped.trim_end_matches('/');
    }

    if model.is_empty() {
        None
    } else {
        Some(model)
    }
}

pub fn build_request(request: &ChatRequest, ctx: &BuildContext<'_>) -> Result<WireRequest, Failure> {
    required_key(request)?;

    match legacy_model_id(request.base_endpoint()) {
        Some(model) => build_chat_completion(
            ctx.huggingface_router_url.trim_end_matches('/'),
            model,
            request,
        ),
        None => build_chat_completion(request.base_endpoint(), &request.model, request),
    }
}

/// Look up `key` on the first array element, then on the top-level object
fn task_field(body: &Value, key: &str) -> Option<String> {
    let target = match body {
        Value::Array(items) => items.first()?,
        other => other,
    };
    target.get(key).and_then(Value::as_str).map(str::to_string)
}

fn generated_text(body: &Value) -> Option<String> {
    task_field(body, "generated_text")
}

fn answer(body: &Value) -> Option<String> {
    task_field(body, "answer")
}

fn translation_text(body: &Value) -> Option<String> {
    task_field(body, "translation_text")
}

fn label(body: &Value) -> Option<String> {
    task_field(body, "label")
}

const SHAPES: &[ShapeMatcher] = &[
    ShapeMatcher {
        name: "choices.message.content",
        extract: choice_message_content,
    },
    ShapeMatcher {
        name: "generated_text",
        extract: generated_text,
    },
    ShapeMatcher {
        name: "answer",
        extract: answer,
    },
    ShapeMatcher {
        name: "translation_text",
        extract: translation_text,
    },
    ShapeMatcher {
        name: "label",
        extract: label,
    },
];

pub fn extract_text(body: &Value) -> Extraction {
    match_shapes(body, SHAPES)
}
