//! Prism - provider adapter gateway for LLM APIs
//!
//! This library provides the core functionality for the Prism server. It takes
//! one normalized chat request and speaks whichever of five provider wire
//! protocols the endpoint implies: OpenAI-compatible, Anthropic, Google,
//! Cohere or HuggingFace.

pub mod config;
pub mod docs;
pub mod error;
pub mod gateway;
pub mod metrics;
pub mod routes;

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;

pub use crate::config::Config;
pub use crate::gateway::{ChatRequest, ChatResult, ErrorKind, Gateway, ProviderKind, Transport};

/// Application state shared across all request handlers
pub struct AppState {
    pub config: Config,
    pub start_time: Instant,
    pub gateway: Arc<Gateway>,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(seconds) = config.upstream_timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let http_client = builder.build()?;

        let gateway = Arc::new(Gateway::from_config(http_client, &config));

        Ok(Self {
            config,
            start_time: Instant::now(),
            gateway,
        })
    }

    /// Create an application state around a custom transport
    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Self {
        let gateway = Arc::new(Gateway::new(
            transport,
            config.huggingface_router_url.clone(),
        ));

        Self {
            config,
            start_time: Instant::now(),
            gateway,
        }
    }
}
