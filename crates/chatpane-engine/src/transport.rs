//! Wire transport for the chat endpoint.
//!
//! One request per message: `POST /chat` with `{"message": ...}`, answered by
//! a JSON object carrying a `reply` string. Status codes are not inspected;
//! a body that does not decode is a failure like any other.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{Config, ConfigError};

/// Request body sent to the chat endpoint.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    /// Trimmed user text.
    pub message: &'a str,
}

/// Response body expected from the chat endpoint.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    /// Assistant text to render.
    pub reply: String,
}

/// Something that can carry one message to the server and bring back a reply.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send `message` and return the reply text.
    async fn send(&self, message: &str) -> Result<String, TransportError>;
}

/// HTTP transport backed by reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
}

impl HttpTransport {
    /// Create a transport posting to the full chat URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    /// Create a transport for the endpoint named in `config`.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self::new(config.chat_url()?))
    }

    /// The URL requests are posted to.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, message: &str) -> Result<String, TransportError> {
        debug!(url = %self.url, len = message.len(), "posting chat message");

        // `.json()` also sets `Content-Type: application/json`.
        let response = self
            .client
            .post(&self.url)
            .json(&ChatRequest { message })
            .send()
            .await
            .map_err(TransportError::Request)?;

        let status = response.status();
        let body = response.text().await.map_err(TransportError::Request)?;
        debug!(%status, bytes = body.len(), "chat response received");

        let parsed: ChatResponse = serde_json::from_str(&body).map_err(TransportError::Decode)?;
        Ok(parsed.reply)
    }
}

/// Errors that can occur while exchanging a message.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request could not be sent or its body could not be read.
    #[error("Request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The response body was not a JSON object with a `reply` string.
    #[error("Decode error: {0}")]
    Decode(#[source] serde_json::Error),

    /// The task carrying the request panicked or was aborted.
    #[error("Request task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
