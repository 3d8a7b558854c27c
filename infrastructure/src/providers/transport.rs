//! Transport seams injected into provider adapters.
//!
//! Adapters own the wire format; transports own the network call. Both
//! traits move opaque JSON bodies so tests can substitute in-memory stubs.

use async_trait::async_trait;
use bridge_application::TransportError;

/// POSTs a chat-completions request body and returns the raw response body.
#[async_trait]
pub trait ChatCompletionsTransport: Send + Sync {
    async fn post_chat_completions(&self, body: Vec<u8>) -> Result<Vec<u8>, TransportError>;
}

/// Invokes a hosted model by identifier and returns the raw response body.
#[async_trait]
pub trait InvokeModelTransport: Send + Sync {
    async fn invoke_model(&self, model_id: &str, body: Vec<u8>) -> Result<Vec<u8>, TransportError>;
}
