//! Outbound message endpoint.
//!
//! The widget talks to exactly one remote endpoint: `POST {base_url}/message`
//! with `{"text": ...}`, answered by `{"message": ...}`.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

/// Request body sent to the message endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRequest {
    pub text: String,
}

/// Response body returned by the message endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageReply {
    pub message: String,
}

/// Errors from the outbound request.
///
/// The controller treats every variant the same way; the distinction only
/// shows up in logs.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Transport failure, including timeouts and refused connections.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status.
    #[error("Backend returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// Response body was not `{"message": string}`.
    #[error("Malformed reply: {0}")]
    Decode(#[from] serde_json::Error),

    /// Base URL could not be joined with the endpoint path.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Completion endpoint answered without any choice text.
    #[error("Completion returned no content")]
    EmptyCompletion,
}

/// Something that can answer a user message.
///
/// `conversation` identifies the widget session the message came from.
/// Stateless backends ignore it.
#[async_trait]
pub trait MessageBackend: Send + Sync + std::fmt::Debug {
    /// Send one message and return the reply text.
    async fn send(&self, conversation: &str, text: &str) -> Result<String, BackendError>;

    /// Drop any state kept for `conversation`.
    fn end_conversation(&self, _conversation: &str) {}
}

/// Path of the message endpoint, relative to the base URL.
pub const MESSAGE_PATH: &str = "message";

/// reqwest-backed [`MessageBackend`].
#[derive(Debug, Clone)]
pub struct HttpBackend {
    endpoint: Url,
    http: reqwest::Client,
}

impl HttpBackend {
    /// Create a backend for `base_url` with no request timeout.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, BackendError> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a backend whose requests give up after `timeout`.
    pub fn with_timeout(base_url: impl AsRef<str>, timeout: Duration) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Self::with_client(base_url, http)
    }

    /// Create a backend around a preconfigured reqwest client.
    pub fn with_client(base_url: impl AsRef<str>, http: reqwest::Client) -> Result<Self, BackendError> {
        let endpoint = endpoint_url(base_url.as_ref(), MESSAGE_PATH)?;
        Ok(Self { endpoint, http })
    }

    /// Full URL the backend posts to.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// Join `base` and a relative `path`, keeping any path prefix on `base`.
pub(crate) fn endpoint_url(base: &str, path: &str) -> Result<Url, url::ParseError> {
    let mut base = Url::parse(base)?;
    if !base.path().ends_with('/') {
        let prefix = format!("{}/", base.path());
        base.set_path(&prefix);
    }
    base.join(path)
}

#[async_trait]
impl MessageBackend for HttpBackend {
    async fn send(&self, _conversation: &str, text: &str) -> Result<String, BackendError> {
        let body = MessageRequest {
            text: text.to_string(),
        };

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        if !status.is_success() {
            return Err(BackendError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        let reply: MessageReply = serde_json::from_slice(&bytes)?;
        Ok(reply.message)
    }
}
