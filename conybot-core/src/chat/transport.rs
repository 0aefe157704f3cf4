// src/chat/transport.rs
//
// Seam between the completion client and the network. The trait exists so
// tests can exercise both apology paths without real HTTP; the default
// implementation wraps reqwest.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

/// Failure classes of one completion call. `Transport` covers everything
/// at the connection level (DNS, connect, timeout); `Malformed` a body
/// that is not JSON.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("malformed response body: {0}")]
    Malformed(String),
}

/// Raw outcome of one completion call: HTTP status plus parsed JSON body.
#[derive(Debug, Clone)]
pub struct CompletionHttpResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

#[automock]
#[async_trait]
pub trait CompletionTransport: Send + Sync {
    async fn post_json(
        &self,
        url: String,
        headers: HashMap<String, String>,
        payload: serde_json::Value,
        timeout: Duration,
    ) -> Result<CompletionHttpResponse, TransportError>;
}

pub struct ReqwestCompletionTransport {
    client: reqwest::Client,
}

impl ReqwestCompletionTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for ReqwestCompletionTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionTransport for ReqwestCompletionTransport {
    async fn post_json(
        &self,
        url: String,
        headers: HashMap<String, String>,
        payload: serde_json::Value,
        timeout: Duration,
    ) -> Result<CompletionHttpResponse, TransportError> {
        let mut request = self.client.post(&url).timeout(timeout).json(&payload);
        for (key, value) in headers {
            request = request.header(&key, value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::Transport(e.to_string()))?;
        let body: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| TransportError::Malformed(e.to_string()))?;

        Ok(CompletionHttpResponse { status, body })
    }
}
