//! Provider identity value object

use super::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Supported LLM backends (Value Object)
///
/// The set is closed: anything else is rejected when parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// OpenAI-style chat completions API
    Gpt,
    /// Llama 3 behind the managed inference gateway (folded transcript prompt)
    Llama,
    /// Claude behind the managed inference gateway (block content messages)
    Claude,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 3] = [
        ProviderKind::Gpt,
        ProviderKind::Llama,
        ProviderKind::Claude,
    ];

    /// Get the canonical lowercase identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Gpt => "gpt",
            ProviderKind::Llama => "llama",
            ProviderKind::Claude => "claude",
        }
    }

    /// Whether this provider is reached through the managed inference gateway
    pub fn uses_inference_gateway(&self) -> bool {
        matches!(self, ProviderKind::Llama | ProviderKind::Claude)
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = DomainError;

    /// Case-insensitive parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gpt" => Ok(ProviderKind::Gpt),
            "llama" => Ok(ProviderKind::Llama),
            "claude" => Ok(ProviderKind::Claude),
            _ => Err(DomainError::UnsupportedProvider(s.to_string())),
        }
    }
}

impl Serialize for ProviderKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProviderKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
