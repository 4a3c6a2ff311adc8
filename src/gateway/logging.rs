//! Structured logging for gateway calls
//!
//! One [`CallContext`] per call carries a short correlation id and timing.
//! Only metadata is logged: never the API key, the user message, or bodies.

use std::time::Instant;

use tracing::{debug, info, warn, Span};
use uuid::Uuid;

use super::classifier::ProviderKind;
use super::translate::Extraction;
use super::types::Failure;

#[derive(Debug, Clone)]
pub struct CallContext {
    /// Unique identifier for this call (for log correlation)
    pub trace_id: String,
    pub start_time: Instant,
    pub provider: ProviderKind,
    pub model: String,
}

impl CallContext {
    pub fn new(provider: ProviderKind, model: &str) -> Self {
        Self {
            trace_id: Uuid::new_v4().to_string()[..8].to_string(),
            start_time: Instant::now(),
            provider,
            model: model.to_string(),
        }
    }

    pub fn elapsed_ms(&self) -> u128 {
        self.start_time.elapsed().as_millis()
    }

    pub fn log_call_start(&self, history_len: usize, stealth: bool) {
        info!(
            trace_id = %self.trace_id,
            provider = %self.provider,
            model = %self.model,
            history_len = history_len,
            stealth = stealth,
            "Gateway call started"
        );
    }

    pub fn log_upstream_request(&self) {
        debug!(
            trace_id = %self.trace_id,
            provider = %self.provider,
            elapsed_ms = %self.elapsed_ms(),
            "Sending request to upstream"
        );
    }

    pub fn log_upstream_response(&self, status: u16, body_len: usize) {
        info!(
            trace_id = %self.trace_id,
            provider = %self.provider,
            status = status,
            body_len = body_len,
            elapsed_ms = %self.elapsed_ms(),
            "Response received from upstream"
        );
    }

    /// Log how the reply text was found; both fallback cases are warnings
    pub fn log_extraction(&self, extraction: &Extraction) {
        match extraction {
            Extraction::Text { shape, text } => debug!(
                trace_id = %self.trace_id,
                provider = %self.provider,
                shape = %shape,
                text_len = text.len(),
                "Extracted reply text"
            ),
            Extraction::Empty { shape } => warn!(
                trace_id = %self.trace_id,
                provider = %self.provider,
                shape = %shape,
                "Upstream returned empty content, using fallback text"
            ),
            Extraction::Unrecognized => warn!(
                trace_id = %self.trace_id,
                provider = %self.provider,
                "Unrecognized response shape, using fallback text"
            ),
        }
    }

    pub fn log_call_complete(&self) {
        info!(
            trace_id = %self.trace_id,
            provider = %self.provider,
            model = %self.model,
            elapsed_ms = %self.elapsed_ms(),
            "Gateway call completed"
        );
    }

    pub fn log_failure(&self, failure: &Failure) {
        warn!(
            trace_id = %self.trace_id,
            provider = %self.provider,
            model = %self.model,
            kind = %failure.kind.as_str(),
            elapsed_ms = %self.elapsed_ms(),
            "Gateway call failed"
        );
    }

    pub fn create_span(&self) -> Span {
        tracing::info_span!(
            "gateway_call",
            trace_id = %self.trace_id,
            provider = %self.provider,
            model = %self.model,
        )
    }
}
