//! Provider adapters and the gateway that dispatches to them.
//!
//! Each backend gets one [`ProviderAdapter`] that translates the canonical
//! message history into that backend's request, performs the call through
//! an injected transport, and pulls plain text out of the reply.

pub mod bedrock;
pub mod factory;
pub mod gateway;
pub mod openai;
pub mod payload;
pub mod transport;

use async_trait::async_trait;
use bridge_application::GatewayError;
use bridge_domain::{Message, ProviderKind};

pub use payload::{BlockTurn, ChatTurn, ContentBlock, ProviderPayload, RawResponse};

/// Bidirectional translation between canonical messages and one backend.
///
/// `format` and `extract` are pure; `invoke` is the only step that
/// touches the network. Adapters are immutable after construction and
/// safe to share across concurrent callers.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// Fixed backend model identifier
    fn model_id(&self) -> &str;

    /// Translate the history into this backend's payload. An empty history
    /// yields an empty payload rather than an error.
    fn format(&self, history: &[Message]) -> Result<ProviderPayload, GatewayError>;

    /// Perform one backend call.
    async fn invoke(&self, payload: ProviderPayload) -> Result<RawResponse, GatewayError>;

    /// Pull the reply text out of a raw response body.
    fn extract(&self, raw: &RawResponse) -> Result<String, GatewayError>;
}

/// Error for a payload handed to the wrong adapter.
pub(crate) fn payload_mismatch(kind: ProviderKind, payload: &ProviderPayload) -> GatewayError {
    GatewayError::Formatting(format!(
        "{kind} adapter cannot send a {} payload",
        payload.shape()
    ))
}

/// Serialize a request body, reporting failure as a formatting error.
pub(crate) fn encode_body<T: serde::Serialize>(
    kind: ProviderKind,
    request: &T,
) -> Result<Vec<u8>, GatewayError> {
    serde_json::to_vec(request)
        .map_err(|e| GatewayError::Formatting(format!("failed to encode {kind} request: {e}")))
}

/// Decode a raw response body, reporting failure as a parse error.
pub(crate) fn decode_body<T: serde::de::DeserializeOwned>(
    kind: ProviderKind,
    raw: &RawResponse,
) -> Result<T, GatewayError> {
    serde_json::from_slice(raw.as_bytes())
        .map_err(|e| GatewayError::response_parse(kind, e.to_string()))
}
