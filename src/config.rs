//! Configuration management for Prism
//!
//! Configuration is loaded from environment variables. Every setting has a
//! default, so the service starts with an empty environment.

use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_HUGGINGFACE_ROUTER_URL: &str = "https://router.huggingface.co/v1";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,

    /// OpenAI-compatible router that legacy HuggingFace inference URLs are rewritten to
    pub huggingface_router_url: String,

    /// Client-wide upstream timeout. `None` leaves the HTTP client default in place.
    pub upstream_timeout_seconds: Option<u64>,

    pub log_format: LogFormat,

    /// Serve the OpenAPI document
    pub docs_enabled: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("PRISM_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PRISM_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid PRISM_PORT")?,

            huggingface_router_url: env::var("HUGGINGFACE_ROUTER_URL")
                .unwrap_or_else(|_| DEFAULT_HUGGINGFACE_ROUTER_URL.to_string()),

            upstream_timeout_seconds: match env::var("UPSTREAM_TIMEOUT_SECONDS") {
                Ok(value) => Some(value.parse().context("Invalid UPSTREAM_TIMEOUT_SECONDS")?),
                Err(_) => None,
            },

            log_format: match env::var("PRISM_LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                _ => LogFormat::Text,
            },

            docs_enabled: env::var("DOCS_ENABLED")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(true),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            huggingface_router_url: DEFAULT_HUGGINGFACE_ROUTER_URL.to_string(),
            upstream_timeout_seconds: None,
            log_format: LogFormat::Text,
            docs_enabled: true,
        }
    }
}
