//! Request/response bodies for models invoked through Bedrock.

use crate::providers::BlockTurn;
use serde::{Deserialize, Serialize};

// ─── Llama ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub(super) struct LlamaRequest<'a> {
    pub prompt: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct LlamaResponse {
    pub generation: String,
}

// ─── Claude ──────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub(super) struct ClaudeRequest<'a> {
    pub anthropic_version: &'a str,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<&'a str>,
    pub messages: &'a [BlockTurn],
}

#[derive(Debug, Deserialize)]
pub(super) struct ClaudeResponse {
    #[serde(default)]
    pub content: Vec<ClaudeResponseBlock>,
}

/// Only the `text` field is read; block `type` is ignored.
#[derive(Debug, Deserialize)]
pub(super) struct ClaudeResponseBlock {
    pub text: String,
}
