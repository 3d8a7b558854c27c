//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unsupported provider '{0}'. Choose from 'gpt', 'llama', or 'claude'")]
    UnsupportedProvider(String),

    #[error("Invalid role '{0}'. Expected one of 'system', 'user', 'assistant'")]
    InvalidRole(String),

    #[error("Message content must not be empty")]
    EmptyContent,
}

impl DomainError {
    /// Check if this error rejects a provider identifier
    pub fn is_unsupported_provider(&self) -> bool {
        matches!(self, DomainError::UnsupportedProvider(_))
    }
}
