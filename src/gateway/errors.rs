//! Upstream error classification
//!
//! Turns a raw upstream reply into a [`Failure`]. Accepts bodies that are not
//! JSON at all; the message is always a plain string fit for display.

use serde_json::Value;

use super::classifier::ProviderKind;
use super::transport::{RawResponse, TransportError};
use super::types::{ErrorKind, Failure};

/// Longest slice of a non-JSON body surfaced to the caller
pub const BODY_SNIPPET_CHARS: usize = 200;

/// First [`BODY_SNIPPET_CHARS`] characters of a body, trimmed
pub fn body_snippet(body: &str) -> String {
    body.trim().chars().take(BODY_SNIPPET_CHARS).collect()
}

/// Failure for a reply with no body at all
pub fn empty_body(provider: ProviderKind, status: u16) -> Failure {
    Failure::new(
        ErrorKind::MalformedUpstreamResponse,
        format!(
            "{} API returned an empty response (status {})",
            provider.display_name(),
            status
        ),
    )
}

/// Failure for a success reply whose body is not valid JSON
pub fn unparseable_body(body: &str) -> Failure {
    Failure::new(ErrorKind::MalformedUpstreamResponse, body_snippet(body))
}

/// Failure for a request that never produced a complete reply
pub fn transport_failure(provider: ProviderKind, err: &TransportError) -> Failure {
    let message = match err {
        TransportError::Timeout(_) => {
            format!("{} API request timed out", provider.display_name())
        }
        TransportError::Send(_) => {
            format!("Could not reach {} API: {}", provider.display_name(), err)
        }
        TransportError::Body(_) => format!(
            "Failed to read {} API response: {}",
            provider.display_name(),
            err
        ),
    };
    Failure::new(ErrorKind::NetworkError, message)
}

/// Provider error text, checked in a fixed field order
fn error_message(body: &Value) -> Option<String> {
    let candidates = [
        body.pointer("/error/message"),
        body.get("error"),
        body.get("message"),
        body.get("detail"),
    ];

    candidates
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(str::to_string)
}

/// HuggingFace cold-start estimate, in seconds
fn estimated_time(body: &Value) -> Option<f64> {
    body.get("estimated_time").and_then(Value::as_f64)
}

/// Classify a non-success reply
pub fn classify_error(provider: ProviderKind, raw: &RawResponse) -> Failure {
    if raw.body.trim().is_empty() {
        return empty_body(provider, raw.status);
    }

    let parsed: Option<Value> = serde_json::from_str(&raw.body).ok();

    if raw.status == 503 {
        if let Some(seconds) = parsed.as_ref().and_then(estimated_time) {
            return Failure::new(
                ErrorKind::ModelLoading,
                format!(
                    "Model is loading, estimated time {} seconds. Please retry later.",
                    seconds
                ),
            );
        }
    }

    let kind = match raw.status {
        401 | 403 => ErrorKind::UpstreamAuth,
        429 => ErrorKind::UpstreamRateLimit,
        _ => ErrorKind::UpstreamError,
    };

    let message = match parsed {
        Some(body) => error_message(&body).unwrap_or_else(|| {
            format!("{} API error: {}", provider.display_name(), raw.status)
        }),
        None => format!(
            "{} API error: {}: {}",
            provider.display_name(),
            raw.status,
            body_snippet(&raw.body)
        ),
    };

    Failure::new(kind, message)
}
