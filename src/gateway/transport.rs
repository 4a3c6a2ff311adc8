//! Upstream HTTP transport
//!
//! Sends a [`WireRequest`] and hands back the status plus the full body as
//! text. Nothing here assumes the body is JSON, whatever the status.

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use super::types::WireRequest;

/// Raw upstream reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failures before a complete reply was read
///
/// URLs are stripped from the wrapped errors since some providers carry the
/// API key in the query string.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request could not be sent: {0}")]
    Send(#[source] reqwest::Error),

    #[error("request timed out")]
    Timeout(#[source] reqwest::Error),

    #[error("response body could not be read: {0}")]
    Body(#[source] reqwest::Error),
}

impl TransportError {
    fn from_send(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(err)
        } else {
            TransportError::Send(err)
        }
    }
}

/// Trait defining how wire requests reach an upstream
///
/// The gateway holds one transport for its lifetime. Implementations must be
/// safe to call concurrently and keep no per-call state.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: WireRequest) -> Result<RawResponse, TransportError>;
}

/// reqwest-backed transport
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: WireRequest) -> Result<RawResponse, TransportError> {
        let response = self
            .client
            .post(&request.url)
            .headers(request.headers)
            .json(&request.body)
            .send()
            .await
            .map_err(|e| TransportError::from_send(e.without_url()))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            let e = e.without_url();
            if e.is_timeout() {
                TransportError::Timeout(e)
            } else {
                TransportError::Body(e)
            }
        })?;

        debug!(status = %status, body_len = body.len(), "Upstream response read");

        Ok(RawResponse { status, body })
    }
}
