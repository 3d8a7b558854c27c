//! Provider-specific request payloads and the raw responses they produce.

use bridge_domain::{Message, Role};
use serde::{Deserialize, Serialize};

/// One structured `{role, content}` turn (gpt wire shape).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl From<&Message> for ChatTurn {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role(),
            content: message.content().to_string(),
        }
    }
}

/// A typed content block (claude wire shape).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Text { text: String },
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        ContentBlock::Text { text: text.into() }
    }
}

/// One `{role, content: [blocks]}` turn (claude wire shape).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockTurn {
    pub role: Role,
    pub content: Vec<ContentBlock>,
}

/// The history translated into one backend's native request shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderPayload {
    /// One structured turn per message.
    Chat(Vec<ChatTurn>),
    /// Whole history folded into a single prompt string.
    Prompt(String),
    /// Block-content turns, with `system` messages hoisted out.
    Blocks {
        system: Option<String>,
        turns: Vec<BlockTurn>,
    },
}

impl ProviderPayload {
    /// Short name of the payload shape, for diagnostics.
    pub fn shape(&self) -> &'static str {
        match self {
            ProviderPayload::Chat(_) => "chat",
            ProviderPayload::Prompt(_) => "prompt",
            ProviderPayload::Blocks { .. } => "blocks",
        }
    }
}

/// Undecoded response body returned by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    body: Vec<u8>,
}

impl RawResponse {
    pub fn new(body: Vec<u8>) -> Self {
        Self { body }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

impl From<Vec<u8>> for RawResponse {
    fn from(body: Vec<u8>) -> Self {
        Self::new(body)
    }
}

impl From<&str> for RawResponse {
    fn from(body: &str) -> Self {
        Self::new(body.as_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_block_wire_shape() {
        let json = serde_json::to_value(ContentBlock::text("hi")).unwrap();
        assert_eq!(json, serde_json::json!({"type": "text", "text": "hi"}));
    }

    #[test]
    fn test_chat_turn_from_message() {
        let turn = ChatTurn::from(&Message::system("rules"));
        assert_eq!(
            serde_json::to_value(&turn).unwrap(),
            serde_json::json!({"role": "system", "content": "rules"})
        );
    }

    #[test]
    fn test_payload_shape_names() {
        assert_eq!(ProviderPayload::Chat(vec![]).shape(), "chat");
        assert_eq!(ProviderPayload::Prompt(String::new()).shape(), "prompt");
        assert_eq!(
            ProviderPayload::Blocks {
                system: None,
                turns: vec![]
            }
            .shape(),
            "blocks"
        );
    }
}
