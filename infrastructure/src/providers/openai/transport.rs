//! HTTP transport for OpenAI-compatible chat completions endpoints.

use crate::providers::transport::ChatCompletionsTransport;
use async_trait::async_trait;
use bridge_application::{TransportError, TransportErrorKind};
use bridge_domain::{OpenAiProviderConfig, ProviderKind};
use reqwest::Client;
use tracing::debug;

pub struct HttpChatTransport {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpChatTransport {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Build from configuration, resolving the API key.
    ///
    /// An explicit `api_key` wins over the environment variable named by
    /// `api_key_env`. A missing key is an authentication failure.
    pub fn from_config(config: &OpenAiProviderConfig) -> Result<Self, TransportError> {
        let api_key = resolve_api_key(config).ok_or_else(|| {
            TransportError::new(
                ProviderKind::Gpt,
                TransportErrorKind::Authentication,
                format!("no API key configured (set {})", config.api_key_env),
            )
        })?;
        let client = Client::builder().build().map_err(|e| {
            TransportError::new(ProviderKind::Gpt, TransportErrorKind::Network, e.to_string())
        })?;
        Ok(Self::new(client, config.base_url.clone(), api_key))
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

fn resolve_api_key(config: &OpenAiProviderConfig) -> Option<String> {
    config
        .api_key
        .clone()
        .or_else(|| std::env::var(&config.api_key_env).ok())
        .filter(|key| !key.is_empty())
}

/// Classify a non-success HTTP status.
pub(super) fn kind_for_status(status: u16, body: &str) -> TransportErrorKind {
    match status {
        401 | 403 => TransportErrorKind::Authentication,
        408 => TransportErrorKind::Timeout,
        429 if body.contains("insufficient_quota") => TransportErrorKind::QuotaExceeded,
        429 => TransportErrorKind::Throttled,
        502..=504 => TransportErrorKind::ModelUnavailable,
        _ => TransportErrorKind::Backend,
    }
}

fn request_error(err: reqwest::Error) -> TransportError {
    let kind = if err.is_timeout() {
        TransportErrorKind::Timeout
    } else {
        TransportErrorKind::Network
    };
    TransportError::new(ProviderKind::Gpt, kind, err.to_string())
}

#[async_trait]
impl ChatCompletionsTransport for HttpChatTransport {
    async fn post_chat_completions(&self, body: Vec<u8>) -> Result<Vec<u8>, TransportError> {
        let url = self.endpoint();
        debug!(url = %url, bytes = body.len(), "POST chat completions");

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .bearer_auth(&self.api_key)
            .body(body)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            let code = status.as_u16();
            return Err(
                TransportError::new(ProviderKind::Gpt, kind_for_status(code, &message), message)
                    .with_status(code),
            );
        }

        let bytes = response.bytes().await.map_err(request_error)?;
        Ok(bytes.to_vec())
    }
}
