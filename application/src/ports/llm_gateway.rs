//! LLM Gateway port
//!
//! Defines the interface for sending a conversation to one provider and
//! the error taxonomy every stage (format, invoke, extract) reports through.

use async_trait::async_trait;
use bridge_domain::{DomainError, Message, ProviderKind};
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Cause category of a transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Connection, DNS, TLS or I/O failure before a response arrived
    Network,
    /// Bad, expired or missing credentials
    Authentication,
    /// Backend asked the caller to slow down
    Throttled,
    /// Account quota exhausted
    QuotaExceeded,
    /// Model warming up or backend temporarily unavailable
    ModelUnavailable,
    /// Backend or transport gave up waiting
    Timeout,
    /// Any other backend-reported error
    Backend,
}

impl TransportErrorKind {
    /// Whether repeating the identical request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TransportErrorKind::Network
                | TransportErrorKind::Throttled
                | TransportErrorKind::ModelUnavailable
                | TransportErrorKind::Timeout
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransportErrorKind::Network => "network",
            TransportErrorKind::Authentication => "authentication",
            TransportErrorKind::Throttled => "throttled",
            TransportErrorKind::QuotaExceeded => "quota exceeded",
            TransportErrorKind::ModelUnavailable => "model unavailable",
            TransportErrorKind::Timeout => "timeout",
            TransportErrorKind::Backend => "backend",
        }
    }
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure raised by a provider transport, surfaced unchanged to callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{provider} transport error ({kind}): {message}")]
pub struct TransportError {
    pub provider: ProviderKind,
    pub kind: TransportErrorKind,
    /// HTTP status when the backend answered at all
    pub status: Option<u16>,
    pub message: String,
}

impl TransportError {
    pub fn new(
        provider: ProviderKind,
        kind: TransportErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            kind,
            status: None,
            message: message.into(),
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Unsupported provider '{0}'. Choose from 'gpt', 'llama', or 'claude'")]
    UnsupportedProvider(String),

    #[error("Formatting error: {0}")]
    Formatting(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Failed to parse {provider} response: {message}")]
    ResponseParse {
        provider: ProviderKind,
        message: String,
    },

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Request cancelled")]
    Cancelled,
}

impl GatewayError {
    pub fn response_parse(provider: ProviderKind, message: impl Into<String>) -> Self {
        GatewayError::ResponseParse {
            provider,
            message: message.into(),
        }
    }

    /// Whether the caller may reasonably retry the same call.
    pub fn is_retryable(&self) -> bool {
        match self {
            GatewayError::Transport(e) => e.is_retryable(),
            GatewayError::Timeout(_) => true,
            _ => false,
        }
    }

    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, GatewayError::Cancelled)
    }
}

impl From<DomainError> for GatewayError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::UnsupportedProvider(id) => GatewayError::UnsupportedProvider(id),
            other @ (DomainError::InvalidRole(_) | DomainError::EmptyContent) => {
                GatewayError::Formatting(other.to_string())
            }
        }
    }
}

/// Gateway for LLM communication
///
/// A gateway is bound to exactly one provider for its whole lifetime.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Provider this gateway dispatches to
    fn provider(&self) -> ProviderKind;

    /// Backend model identifier used for every call
    fn model_id(&self) -> &str;

    /// Send the full history and return the assistant's reply text
    async fn send(&self, history: &[Message]) -> Result<String, GatewayError>;

    /// Like [`send`](Self::send), but aborts as soon as `cancel` fires.
    async fn send_cancellable(
        &self,
        history: &[Message],
        cancel: &CancellationToken,
    ) -> Result<String, GatewayError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(GatewayError::Cancelled),
            result = self.send(history) => result,
        }
    }
}
