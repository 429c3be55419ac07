//! Minimal OpenAI-compatible chat completions client.
//!
//! Only the non-streaming `POST {base_url}/chat/completions` call with a
//! single user message is supported.

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use url::Url;

use super::backend::{BackendError, endpoint_url};

/// Path of the completions endpoint, relative to the base URL.
pub const COMPLETIONS_PATH: &str = "chat/completions";

/// Settings for a [`CompletionClient`].
#[derive(Clone)]
pub struct CompletionSettings {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub temperature: f32,
    /// `None` disables the client-side timeout.
    pub timeout: Option<Duration>,
}

impl std::fmt::Debug for CompletionSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionSettings")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("temperature", &self.temperature)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// reqwest-backed completions client.
#[derive(Clone)]
pub struct CompletionClient {
    endpoint: Url,
    http: reqwest::Client,
    settings: CompletionSettings,
}

impl std::fmt::Debug for CompletionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("settings", &self.settings)
            .finish()
    }
}

impl CompletionClient {
    pub fn new(settings: CompletionSettings) -> Result<Self, BackendError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        let endpoint = endpoint_url(&settings.base_url, COMPLETIONS_PATH)?;

        Ok(Self {
            endpoint,
            http,
            settings,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Send `prompt` as a single user message and return the first choice.
    pub async fn complete(&self, prompt: &str) -> Result<String, BackendError> {
        let body = json!({
            "model": self.settings.model,
            "messages": [{ "role": "user", "content": prompt }],
            "temperature": self.settings.temperature,
        });

        let mut rb = self.http.post(self.endpoint.clone()).json(&body);
        if let Some(k) = &self.settings.api_key {
            rb = rb.bearer_auth(k);
        }

        let response = rb.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        if !status.is_success() {
            return Err(BackendError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        let parsed: CompletionResponse = serde_json::from_slice(&bytes)?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|s| !s.trim().is_empty())
            .ok_or(BackendError::EmptyCompletion)
    }
}
