//! Provider classification
//!
//! Maps an endpoint URL to the wire protocol it speaks. Matching is substring
//! based and evaluated in a fixed order; host fragments are checked before the
//! OpenAI-compatible fallback so that HuggingFace deployments exposing
//! `/v1/chat/completions` still get HuggingFace handling.

use std::net::IpAddr;

use reqwest::Url;
use serde::Serialize;

/// Wire protocol family of an upstream endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    OpenAICompatible,
    Anthropic,
    Google,
    Cohere,
    HuggingFace,
}

/// Substring matchers in precedence order. Anything unmatched is OpenAI-compatible.
const PROVIDER_MATCHERS: &[(ProviderKind, &[&str])] = &[
    (ProviderKind::Anthropic, &["anthropic"]),
    (ProviderKind::Google, &["generativelanguage.googleapis.com"]),
    (ProviderKind::Cohere, &["cohere"]),
    (ProviderKind::HuggingFace, &["huggingface.co", "huggingface.cloud", "hf.space"]),
];

impl ProviderKind {
    pub const ALL: [ProviderKind; 5] = [
        ProviderKind::OpenAICompatible,
        ProviderKind::Anthropic,
        ProviderKind::Google,
        ProviderKind::Cohere,
        ProviderKind::HuggingFace,
    ];

    /// Short name for logs and metric labels
    pub fn name(&self) -> &'static str {
        match self {
            ProviderKind::OpenAICompatible => "openai_compatible",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Google => "google",
            ProviderKind::Cohere => "cohere",
            ProviderKind::HuggingFace => "huggingface",
        }
    }

    /// Name used in messages shown to callers
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderKind::OpenAICompatible => "OpenAI-compatible",
            ProviderKind::Anthropic => "Anthropic",
            ProviderKind::Google => "Google",
            ProviderKind::Cohere => "Cohere",
            ProviderKind::HuggingFace => "HuggingFace",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify an endpoint URL. Total and deterministic.
pub fn classify(endpoint_url: &str) -> ProviderKind {
    let url = endpoint_url.to_ascii_lowercase();

    PROVIDER_MATCHERS
        .iter()
        .find(|(_, fragments)| fragments.iter().any(|fragment| url.contains(fragment)))
        .map(|(kind, _)| *kind)
        .unwrap_or(ProviderKind::OpenAICompatible)
}

/// Whether the endpoint points at the local machine
pub fn is_loopback(endpoint_url: &str) -> bool {
    let Ok(url) = Url::parse(endpoint_url.trim()) else {
        return false;
    };

    match url.host_str() {
        Some(host) => {
            let host = host.trim_start_matches('[').trim_end_matches(']');
            if let Ok(ip) = host.parse::<IpAddr>() {
                return ip.is_loopback() || ip.is_unspecified();
            }
            let host = host.to_ascii_lowercase();
            host == "localhost" || host.ends_with(".localhost") || host == "host.docker.internal"
        }
        None => false,
    }
}

/// Whether a call to this endpoint needs an API key.
///
/// Only the local-loopback OpenAI-compatible family accepts unauthenticated calls.
pub fn requires_credential(kind: ProviderKind, endpoint_url: &str) -> bool {
    !(kind == ProviderKind::OpenAICompatible && is_loopback(endpoint_url))
}
