//! `llama` provider adapter.
//!
//! Llama 3 instruct models take one flat prompt. Every message becomes a
//! header block framed by the model's special tokens, and a trailing
//! `assistant` header with no terminator asks the model to continue.

use super::types::{LlamaRequest, LlamaResponse};
use crate::providers::transport::InvokeModelTransport;
use crate::providers::{
    ProviderAdapter, ProviderPayload, RawResponse, decode_body, encode_body, payload_mismatch,
};
use async_trait::async_trait;
use bridge_application::GatewayError;
use bridge_domain::{Message, ProviderKind, Role};
use std::sync::Arc;

const BEGIN_OF_TEXT: &str = "<|begin_of_text|>";
const START_HEADER: &str = "<|start_header_id|>";
const END_HEADER: &str = "<|end_header_id|>";
const END_OF_TURN: &str = "<|eot_id|>";

/// Fold a history into the Llama 3 chat template.
pub fn fold_transcript(history: &[Message]) -> String {
    let mut prompt = format!("{BEGIN_OF_TEXT}\n");
    for message in history {
        prompt.push_str(&format!(
            "{START_HEADER}{}{END_HEADER}\n{}\n{END_OF_TURN}\n",
            message.role(),
            message.content()
        ));
    }
    prompt.push_str(&format!("{START_HEADER}{}{END_HEADER}\n", Role::Assistant));
    prompt
}

pub struct LlamaAdapter {
    transport: Arc<dyn InvokeModelTransport>,
    model_id: String,
}

impl LlamaAdapter {
    pub fn new(transport: Arc<dyn InvokeModelTransport>, model_id: impl Into<String>) -> Self {
        Self {
            transport,
            model_id: model_id.into(),
        }
    }
}

#[async_trait]
impl ProviderAdapter for LlamaAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Llama
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn format(&self, history: &[Message]) -> Result<ProviderPayload, GatewayError> {
        Ok(ProviderPayload::Prompt(fold_transcript(history)))
    }

    async fn invoke(&self, payload: ProviderPayload) -> Result<RawResponse, GatewayError> {
        let ProviderPayload::Prompt(prompt) = &payload else {
            return Err(payload_mismatch(self.kind(), &payload));
        };
        let body = encode_body(self.kind(), &LlamaRequest { prompt })?;
        let raw = self.transport.invoke_model(&self.model_id, body).await?;
        Ok(RawResponse::new(raw))
    }

    fn extract(&self, raw: &RawResponse) -> Result<String, GatewayError> {
        let response: LlamaResponse = decode_body(self.kind(), raw)?;
        Ok(response.generation)
    }
}
