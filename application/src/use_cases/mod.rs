//! Use cases (application services)
//!
//! - [`conversation::ConversationSession`]: turn-based conversation over one gateway
//! - [`retry::RetryingGateway`]: backoff wrapper for transient gateway failures

pub mod conversation;
pub mod retry;

#[cfg(test)]
pub(crate) mod testing;
