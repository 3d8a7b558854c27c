//! `claude` provider adapter.
//!
//! Turns keep their structure, but each message's text is wrapped in a
//! one-element block array. The messages API only admits `user` and
//! `assistant` turns, so `system` messages are lifted into the top-level
//! `system` field (omitted when there are none).

use super::types::{ClaudeRequest, ClaudeResponse};
use crate::providers::transport::InvokeModelTransport;
use crate::providers::{
    BlockTurn, ContentBlock, ProviderAdapter, ProviderPayload, RawResponse, decode_body,
    encode_body, payload_mismatch,
};
use async_trait::async_trait;
use bridge_application::GatewayError;
use bridge_domain::{Message, ProviderKind, Role};
use std::sync::Arc;

pub const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

pub struct ClaudeAdapter {
    transport: Arc<dyn InvokeModelTransport>,
    model_id: String,
    max_tokens: u32,
}

impl ClaudeAdapter {
    pub fn new(
        transport: Arc<dyn InvokeModelTransport>,
        model_id: impl Into<String>,
        max_tokens: u32,
    ) -> Self {
        Self {
            transport,
            model_id: model_id.into(),
            max_tokens,
        }
    }
}

#[async_trait]
impl ProviderAdapter for ClaudeAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Claude
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn format(&self, history: &[Message]) -> Result<ProviderPayload, GatewayError> {
        let mut system: Vec<&str> = Vec::new();
        let mut turns = Vec::with_capacity(history.len());
        for message in history {
            match message.role() {
                Role::System => system.push(message.content()),
                role => turns.push(BlockTurn {
                    role,
                    content: vec![ContentBlock::text(message.content())],
                }),
            }
        }

        Ok(ProviderPayload::Blocks {
            system: (!system.is_empty()).then(|| system.join("\n\n")),
            turns,
        })
    }

    async fn invoke(&self, payload: ProviderPayload) -> Result<RawResponse, GatewayError> {
        let ProviderPayload::Blocks { system, turns } = &payload else {
            return Err(payload_mismatch(self.kind(), &payload));
        };
        let body = encode_body(
            self.kind(),
            &ClaudeRequest {
                anthropic_version: ANTHROPIC_VERSION,
                max_tokens: self.max_tokens,
                system: system.as_deref(),
                messages: turns,
            },
        )?;
        let raw = self.transport.invoke_model(&self.model_id, body).await?;
        Ok(RawResponse::new(raw))
    }

    fn extract(&self, raw: &RawResponse) -> Result<String, GatewayError> {
        let response: ClaudeResponse = decode_body(self.kind(), raw)?;
        Ok(response
            .content
            .into_iter()
            .map(|block| block.text)
            .collect())
    }
}
