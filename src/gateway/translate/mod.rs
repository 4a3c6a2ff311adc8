//! Per-provider wire translation
//!
//! Each provider module owns a Request Builder (`build_request`) and a Response
//! Extractor (`extract_text`). Dispatch happens once per call on `ProviderKind`.
//!
//! Extractors are driven by an ordered list of [`ShapeMatcher`]s. The first
//! matcher that finds its field decides the outcome, so fixtures can pin
//! precedence exactly.

pub mod anthropic;
pub mod cohere;
pub mod google;
pub mod huggingface;
pub mod openai;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;

use super::classifier::ProviderKind;
use super::types::{ChatRequest, ErrorKind, Failure, WireRequest};

/// Output token cap sent to every provider
pub const MAX_TOKENS: u32 = 4096;

/// Sampling temperature sent where the provider and model accept one
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Text returned to callers when the upstream reply carries no usable text
pub const NO_RESPONSE: &str = "No response";

/// Settings builders need beyond the request itself
#[derive(Debug, Clone, Copy)]
pub struct BuildContext<'a> {
    /// OpenAI-compatible router base for rewritten HuggingFace calls
    pub huggingface_router_url: &'a str,
}

/// Build the wire request for a provider
pub fn build_request(
    kind: ProviderKind,
    request: &ChatRequest,
    ctx: &BuildContext<'_>,
) -> Result<WireRequest, Failure> {
    match kind {
        ProviderKind::OpenAICompatible => openai::build_request(request),
        ProviderKind::Anthropic => anthropic::build_request(request),
        ProviderKind::Google => google::build_request(request),
        ProviderKind::Cohere => cohere::build_request(request),
        ProviderKind::HuggingFace => huggingface::build_request(request, ctx),
    }
}

/// Pull reply text out of a parsed success body
pub fn extract_text(kind: ProviderKind, body: &Value) -> Extraction {
    match kind {
        ProviderKind::OpenAICompatible => openai::extract_text(body),
        ProviderKind::Anthropic => anthropic::extract_text(body),
        ProviderKind::Google => google::extract_text(body),
        ProviderKind::Cohere => cohere::extract_text(body),
        ProviderKind::HuggingFace => huggingface::extract_text(body),
    }
}

/// Result of running an extractor over a parsed body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// A known shape matched with non-empty text
    Text { shape: &'static str, text: String },
    /// A known shape matched but its text was empty
    Empty { shape: &'static str },
    /// No known shape matched
    Unrecognized,
}

impl Extraction {
    /// Text for the caller, falling back to [`NO_RESPONSE`]
    pub fn into_text(self) -> String {
        match self {
            Extraction::Text { text, .. } => text,
            Extraction::Empty { .. } | Extraction::Unrecognized => NO_RESPONSE.to_string(),
        }
    }
}

/// A named accessor for one known response shape
pub struct ShapeMatcher {
    pub name: &'static str,
    pub extract: fn(&Value) -> Option<String>,
}

/// Try each matcher in order; the first one that finds its field wins
pub fn match_shapes(body: &Value, shapes: &[ShapeMatcher]) -> Extraction {
    for shape in shapes {
        if let Some(text) = (shape.extract)(body) {
            return if text.trim().is_empty() {
                Extraction::Empty { shape: shape.name }
            } else {
                Extraction::Text {
                    shape: shape.name,
                    text,
                }
            };
        }
    }
    Extraction::Unrecognized
}

/// Concatenate the string `text` fields of an array of parts, if any exist
pub(crate) fn join_text_parts(parts: &Value) -> Option<String> {
    let texts: Vec<&str> = parts
        .as_array()?
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();

    if texts.is_empty() {
        None
    } else {
        Some(texts.concat())
    }
}

/// Append a path suffix unless the endpoint already ends with it
pub(crate) fn join_path(endpoint: &str, suffix: &str) -> String {
    if endpoint.ends_with(suffix) {
        endpoint.to_string()
    } else {
        format!("{}{}", endpoint, suffix)
    }
}

/// The request's API key, or a `MissingCredential` failure
pub(crate) fn required_key(request: &ChatRequest) -> Result<&str, Failure> {
    request.credential().ok_or_else(|| {
        Failure::new(
            ErrorKind::MissingCredential,
            "An API key is required for this endpoint",
        )
    })
}

/// Convert a credential into a header value
pub(crate) fn credential_header(value: &str) -> Result<HeaderValue, Failure> {
    HeaderValue::from_str(value).map_err(|_| {
        Failure::new(
            ErrorKind::MissingCredential,
            "API key contains characters that are not valid in an HTTP header",
        )
    })
}

/// JSON content-type headers shared by every provider
pub(crate) fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

/// JSON headers plus `Authorization: Bearer` when a key is present.
///
/// With no key the header is left out entirely.
pub(crate) fn bearer_headers(api_key: Option<&str>) -> Result<HeaderMap, Failure> {
    let mut headers = json_headers();
    if let Some(api_key) = api_key {
        headers.insert(AUTHORIZATION, credential_header(&format!("Bearer {}", api_key))?);
    }
    Ok(headers)
}
