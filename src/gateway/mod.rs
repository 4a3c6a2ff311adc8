//! Provider Adapter Gateway
//!
//! Takes one normalized [`ChatRequest`], works out which wire protocol the
//! endpoint speaks, and returns a single normalized [`ChatResult`]:
//!
//! classify -> credential check -> stealth -> build -> send -> extract | classify error
//!
//! The gateway is stateless between calls. It never retries; a `ModelLoading`
//! failure is left to the caller to act on.

pub mod classifier;
pub mod errors;
pub mod logging;
pub mod stealth;
pub mod translate;
pub mod transport;
pub mod types;

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tracing::Instrument;

use crate::config::Config;
use crate::metrics::{record_request, record_upstream_response};

pub use classifier::{classify, ProviderKind};
pub use stealth::apply_stealth;
pub use transport::{HttpTransport, RawResponse, Transport, TransportError};
pub use types::{ChatRequest, ChatResult, ErrorKind, Failure, HistoryMessage, HistoryRole};

use logging::CallContext;
use translate::BuildContext;

/// Gateway orchestrator
pub struct Gateway {
    transport: Arc<dyn Transport>,
    huggingface_router_url: String,
}

impl Gateway {
    pub fn new(transport: Arc<dyn Transport>, huggingface_router_url: impl Into<String>) -> Self {
        Self {
            transport,
            huggingface_router_url: huggingface_router_url.into(),
        }
    }

    /// Create a gateway sending through `client`
    pub fn from_config(client: reqwest::Client, config: &Config) -> Self {
        Self::new(
            Arc::new(HttpTransport::new(client)),
            config.huggingface_router_url.clone(),
        )
    }

    /// Run one request/response round trip
    pub async fn execute(&self, request: ChatRequest) -> ChatResult {
        let provider = classify(&request.endpoint_url);
        let ctx = CallContext::new(provider, &request.model);
        let span = ctx.create_span();

        async move {
            let start = Instant::now();
            ctx.log_call_start(request.history.len(), request.stealth_mode);

            let result = match self.round_trip(provider, &ctx, request).await {
                Ok(text) => {
                    ctx.log_call_complete();
                    ChatResult::success(text)
                }
                Err(failure) => {
                    ctx.log_failure(&failure);
                    ChatResult::Failure(failure)
                }
            };

            let outcome = result.error_kind().map_or("success", |kind| kind.as_str());
            record_request(provider.name(), outcome, start.elapsed().as_secs_f64());

            result
        }
        .instrument(span)
        .await
    }

    async fn round_trip(
        &self,
        provider: ProviderKind,
        ctx: &CallContext,
        request: ChatRequest,
    ) -> Result<String, Failure> {
        if classifier::requires_credential(provider, &request.endpoint_url)
            && request.credential().is_none()
        {
            return Err(Failure::new(
                ErrorKind::MissingCredential,
                format!(
                    "Missing required field: apiKey is required for {} endpoints",
                    provider.display_name()
                ),
            ));
        }

        let request = apply_stealth(request);

        let build_ctx = BuildContext {
            huggingface_router_url: &self.huggingface_router_url,
        };
        let wire = translate::build_request(provider, &request, &build_ctx)?;

        ctx.log_upstream_request();
        let raw = self
            .transport
            .send(wire)
            .await
            .map_err(|e| errors::transport_failure(provider, &e))?;

        ctx.log_upstream_response(raw.status, raw.body.len());
        record_upstream_response(provider.name(), raw.status);

        if !raw.is_success() {
            return Err(errors::classify_error(provider, &raw));
        }
        if raw.body.trim().is_empty() {
            return Err(errors::empty_body(provider, raw.status));
        }

        let body: Value =
            serde_json::from_str(&raw.body).map_err(|_| errors::unparseable_body(&raw.body))?;

        let extraction = translate::extract_text(provider, &body);
        ctx.log_extraction(&extraction);

        Ok(extraction.into_text())
    }
}
