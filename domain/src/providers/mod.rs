//! Provider configuration types (provider-neutral, serde-free).
//!
//! These types define the shape of provider settings without depending
//! on any serialization format (TOML, JSON, etc.).

use crate::core::provider::ProviderKind;

/// Top-level provider configuration.
#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    /// Provider used when the caller does not name one.
    pub default: Option<ProviderKind>,
    /// OpenAI-style chat completions settings.
    pub openai: OpenAiProviderConfig,
    /// Managed inference gateway (AWS Bedrock) settings, shared by llama and claude.
    pub bedrock: BedrockProviderConfig,
}

/// OpenAI-style provider configuration.
#[derive(Debug, Clone)]
pub struct OpenAiProviderConfig {
    /// Environment variable name for the API key (default: "OPENAI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (prefer `api_key_env`).
    pub api_key: Option<String>,
    /// Base URL for the chat completions API.
    pub base_url: String,
    /// Model identifier sent in every request (default: "gpt-4o").
    pub model: String,
}

impl Default for OpenAiProviderConfig {
    fn default() -> Self {
        Self {
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o".to_string(),
        }
    }
}

/// AWS Bedrock provider configuration.
#[derive(Debug, Clone)]
pub struct BedrockProviderConfig {
    /// AWS region (default: "us-east-1").
    pub region: String,
    /// AWS profile name for credentials.
    pub profile: Option<String>,
    /// Llama model identifier.
    pub llama_model: String,
    /// Claude model identifier.
    pub claude_model: String,
    /// Max tokens per claude response (default: 4096).
    pub max_tokens: u32,
}

impl Default for BedrockProviderConfig {
    fn default() -> Self {
        Self {
            region: "us-east-1".to_string(),
            profile: None,
            llama_model: "meta.llama3-8b-instruct-v1:0".to_string(),
            claude_model: "anthropic.claude-3-sonnet-20240229-v1:0".to_string(),
            max_tokens: 4096,
        }
    }
}

impl ProviderConfig {
    /// Model identifier configured for the given provider.
    pub fn model_for(&self, kind: ProviderKind) -> &str {
        match kind {
            ProviderKind::Gpt => &self.openai.model,
            ProviderKind::Llama => &self.bedrock.llama_model,
            ProviderKind::Claude => &self.bedrock.claude_model,
        }
    }
}
