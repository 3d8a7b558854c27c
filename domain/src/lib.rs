//! Domain layer for llm-bridge
//!
//! This crate contains the core entities and value objects shared by every
//! provider backend. It has no dependencies on infrastructure concerns.
//!
//! # Core Concepts
//!
//! - **Message**: a role-tagged piece of conversation text
//! - **Conversation**: append-only, chronologically ordered history
//! - **ProviderKind**: the closed set of backends (`gpt`, `llama`, `claude`)

pub mod core;
pub mod providers;
pub mod session;

// Re-export commonly used types
pub use core::{error::DomainError, provider::ProviderKind};
pub use providers::{BedrockProviderConfig, OpenAiProviderConfig, ProviderConfig};
pub use session::entities::{Conversation, Message, Role};
