//! Conversation domain.
//!
//! - [`entities::Message`]: a single role-tagged message
//! - [`entities::Conversation`]: append-only ordered history of messages

pub mod entities;
