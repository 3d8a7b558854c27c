//! Conversation domain entities

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// Wire name, always lowercase
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    /// Role names must already be lowercase; `"User"` is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "system" => Ok(Role::System),
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            other => Err(DomainError::InvalidRole(other.to_string())),
        }
    }
}

/// A message in a conversation (Entity)
///
/// Immutable once constructed: fields are only reachable through accessors.
/// Untyped input (`parse`, deserialization) must carry non-blank content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMessage")]
pub struct Message {
    role: Role,
    content: String,
}

#[derive(Deserialize)]
struct RawMessage {
    role: Role,
    content: String,
}

impl TryFrom<RawMessage> for Message {
    type Error = DomainError;

    fn try_from(raw: RawMessage) -> Result<Self, Self::Error> {
        Message::checked(raw.role, raw.content)
    }
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Build a message from untyped `{role, content}` input.
    pub fn parse(role: &str, content: impl Into<String>) -> Result<Self, DomainError> {
        Self::checked(role.parse()?, content.into())
    }

    fn checked(role: Role, content: String) -> Result<Self, DomainError> {
        if content.trim().is_empty() {
            return Err(DomainError::EmptyContent);
        }
        Ok(Self { role, content })
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Ordered, append-only conversation history (Entity)
///
/// Insertion order equals chronological turn order. Nothing is ever
/// removed or rewritten once pushed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_system_prompt(system_prompt: impl Into<String>) -> Self {
        let mut conversation = Self::new();
        conversation.push(Message::system(system_prompt));
        conversation
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Number of completed user/assistant exchanges.
    pub fn turn_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.role() == Role::Assistant)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_requires_lowercase() {
        assert_eq!("system".parse::<Role>().unwrap(), Role::System);
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
        assert_eq!("assistant".parse::<Role>().unwrap(), Role::Assistant);
        assert_eq!(
            "User".parse::<Role>().unwrap_err(),
            DomainError::InvalidRole("User".to_string())
        );
        assert!("tool".parse::<Role>().is_err());
    }

    #[test]
    fn test_message_parse() {
        let msg = Message::parse("assistant", "hello").unwrap();
        assert_eq!(msg.role(), Role::Assistant);
        assert_eq!(msg.content(), "hello");
        assert!(Message::parse("bot", "hello").is_err());
    }

    #[test]
    fn test_message_parse_rejects_empty_content() {
        assert_eq!(Message::parse("user", ""), Err(DomainError::EmptyContent));
        assert_eq!(Message::parse("assistant", " \n\t"), Err(DomainError::EmptyContent));
        // Role errors are reported first
        assert_eq!(
            Message::parse("bot", ""),
            Err(DomainError::InvalidRole("bot".to_string()))
        );
    }

    #[test]
    fn test_message_deserialize_rejects_empty_content() {
        let err = serde_json::from_value::<Message>(serde_json::json!({
            "role": "user",
            "content": ""
        }))
        .unwrap_err();
        assert!(err.to_string().contains("empty"), "{err}");

        assert!(
            serde_json::from_value::<Message>(serde_json::json!({
                "role": "User",
                "content": "hi"
            }))
            .is_err()
        );
    }

    #[test]
    fn test_message_serializes_with_lowercase_role() {
        let json = serde_json::to_value(Message::user("hi")).unwrap();
        assert_eq!(json, serde_json::json!({"role": "user", "content": "hi"}));

        let back: Message =
            serde_json::from_value(serde_json::json!({"role": "system", "content": "be brief"}))
                .unwrap();
        assert_eq!(back, Message::system("be brief"));
    }

    #[test]
    fn test_conversation_preserves_insertion_order() {
        let mut conversation = Conversation::new();
        conversation.push(Message::user("one"));
        conversation.push(Message::assistant("two"));
        conversation.push(Message::user("three"));

        let contents: Vec<&str> = conversation.messages().iter().map(|m| m.content()).collect();
        assert_eq!(contents, vec!["one", "two", "three"]);
        assert_eq!(conversation.len(), 3);
        assert_eq!(conversation.turn_count(), 1);
        assert_eq!(conversation.last().unwrap().role(), Role::User);
    }

    #[test]
    fn test_conversation_with_system_prompt() {
        let conversation = Conversation::with_system_prompt("You are terse.");
        assert_eq!(conversation.len(), 1);
        assert_eq!(conversation.messages()[0].role(), Role::System);
        assert_eq!(conversation.turn_count(), 0);
    }
}
