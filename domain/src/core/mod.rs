//! Core domain concepts shared across all subdomains.
//!
//! - [`provider::ProviderKind`]: the closed set of supported backends
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod provider;
