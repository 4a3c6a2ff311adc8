//! Normalized gateway types
//!
//! The provider-independent request the gateway accepts, the result it returns,
//! and the per-call wire request handed from a builder to the transport.

use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Role of a prior conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HistoryRole {
    User,
    Assistant,
}

impl HistoryRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryRole::User => "user",
            HistoryRole::Assistant => "assistant",
        }
    }
}

/// A prior conversation turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HistoryMessage {
    pub role: HistoryRole,
    pub content: String,
}

impl HistoryMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: HistoryRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: HistoryRole::Assistant,
            content: content.into(),
        }
    }
}

/// Normalized chat request
///
/// `endpoint_url` and `model` are validated by the caller before the gateway
/// runs. `api_key` may only be absent for local-loopback OpenAI-compatible
/// endpoints; the gateway enforces that itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, alias = "apiEndpoint")]
    pub endpoint_url: String,
    #[serde(default)]
    pub model: String,
    #[serde(default, alias = "jailbreakPrompt")]
    pub system_prompt: String,
    #[serde(default, alias = "conversationHistory")]
    pub history: Vec<HistoryMessage>,
    #[serde(default)]
    pub user_message: String,
    #[serde(default)]
    pub stealth_mode: bool,
    /// Set once the stealth transform has consumed the plaintext message
    #[serde(skip)]
    pub(crate) stealth_applied: bool,
}

impl ChatRequest {
    pub fn new(endpoint_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: None,
            endpoint_url: endpoint_url.into(),
            model: model.into(),
            system_prompt: String::new(),
            history: Vec::new(),
            user_message: String::new(),
            stealth_mode: false,
            stealth_applied: false,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    pub fn with_history(mut self, history: Vec<HistoryMessage>) -> Self {
        self.history = history;
        self
    }

    pub fn with_user_message(mut self, user_message: impl Into<String>) -> Self {
        self.user_message = user_message.into();
        self
    }

    pub fn with_stealth(mut self, stealth_mode: bool) -> Self {
        self.stealth_mode = stealth_mode;
        self
    }

    /// API key, treating a blank value as absent
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Endpoint with surrounding whitespace and trailing slashes removed
    pub fn base_endpoint(&self) -> &str {
        self.endpoint_url.trim().trim_end_matches('/')
    }
}

/// Classified failure category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    MissingCredential,
    UpstreamAuth,
    UpstreamRateLimit,
    ModelLoading,
    MalformedUpstreamResponse,
    UpstreamError,
    NetworkError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MissingCredential => "missing_credential",
            ErrorKind::UpstreamAuth => "upstream_auth",
            ErrorKind::UpstreamRateLimit => "upstream_rate_limit",
            ErrorKind::ModelLoading => "model_loading",
            ErrorKind::MalformedUpstreamResponse => "malformed_upstream_response",
            ErrorKind::UpstreamError => "upstream_error",
            ErrorKind::NetworkError => "network_error",
        }
    }

    /// Whether the caller can fix this without contacting the upstream again
    pub fn is_caller_error(&self) -> bool {
        matches!(self, ErrorKind::MissingCredential)
    }

    /// Whether retrying after a delay may succeed with unchanged inputs
    pub fn is_transient(&self) -> bool {
        matches!(self, ErrorKind::ModelLoading | ErrorKind::UpstreamRateLimit)
    }
}

/// A classified failure with a display-ready message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: ErrorKind,
    pub message: String,
}

impl Failure {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind.as_str(), self.message)
    }
}

/// Outcome of one gateway call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatResult {
    Success { text: String },
    Failure(Failure),
}

impl ChatResult {
    pub fn success(text: impl Into<String>) -> Self {
        ChatResult::Success { text: text.into() }
    }

    pub fn failure(kind: ErrorKind, message: impl Into<String>) -> Self {
        ChatResult::Failure(Failure::new(kind, message))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ChatResult::Success { .. })
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            ChatResult::Success { .. } => None,
            ChatResult::Failure(failure) => Some(failure.kind),
        }
    }
}

impl From<Failure> for ChatResult {
    fn from(failure: Failure) -> Self {
        ChatResult::Failure(failure)
    }
}

/// Provider-specific HTTP request, consumed by the transport
#[derive(Debug, Clone)]
pub struct WireRequest {
    pub url: String,
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}
