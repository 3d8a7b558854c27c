//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into domain/application
//! types once loaded.

use bridge_application::{ExecutionParams, RetryPolicy};
use bridge_domain::{BedrockProviderConfig, OpenAiProviderConfig, ProviderConfig, ProviderKind};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("unknown provider '{0}'. Choose from 'gpt', 'llama', or 'claude'")]
    UnknownProvider(String),

    #[error("session.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("providers.bedrock.max_tokens cannot be 0")]
    InvalidMaxTokens,

    #[error("model name for {0} cannot be empty")]
    EmptyModelName(ProviderKind),
}

/// `[session]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSessionConfig {
    /// Upper bound on one backend call (default: 120).
    pub timeout_seconds: u64,
    /// System message seeded into every new conversation.
    pub system_prompt: Option<String>,
    /// Path of the JSONL conversation transcript, if any.
    pub conversation_log: Option<PathBuf>,
    /// Retries for throttling, timeouts and network errors (0 disables).
    pub max_retries: u32,
    /// First backoff delay in milliseconds; doubles per retry.
    pub retry_base_delay_ms: u64,
}

impl Default for FileSessionConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 120,
            system_prompt: None,
            conversation_log: None,
            max_retries: 3,
            retry_base_delay_ms: 1000,
        }
    }
}

/// `[providers.openai]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOpenAiConfig {
    /// Environment variable name for the API key (default: "OPENAI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (prefer `api_key_env`).
    pub api_key: Option<String>,
    /// Base URL for the chat completions API (can point at any compatible server).
    pub base_url: String,
    /// Model identifier.
    pub model: String,
}

impl Default for FileOpenAiConfig {
    fn default() -> Self {
        let defaults = OpenAiProviderConfig::default();
        Self {
            api_key_env: defaults.api_key_env,
            api_key: defaults.api_key,
            base_url: defaults.base_url,
            model: defaults.model,
        }
    }
}

/// `[providers.bedrock]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBedrockConfig {
    /// AWS region (default: "us-east-1")
    pub region: String,
    /// AWS profile name for credentials
    pub profile: Option<String>,
    /// Llama model identifier
    pub llama_model: String,
    /// Claude model identifier
    pub claude_model: String,
    /// Max tokens per claude response (default: 4096)
    pub max_tokens: u32,
}

impl Default for FileBedrockConfig {
    fn default() -> Self {
        let defaults = BedrockProviderConfig::default();
        Self {
            region: defaults.region,
            profile: defaults.profile,
            llama_model: defaults.llama_model,
            claude_model: defaults.claude_model,
            max_tokens: defaults.max_tokens,
        }
    }
}

/// `[providers]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    pub openai: FileOpenAiConfig,
    pub bedrock: FileBedrockConfig,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Provider used when none is given on the command line (default: "claude").
    pub provider: String,
    /// Conversation session settings
    pub session: FileSessionConfig,
    /// Backend settings
    pub providers: FileProvidersConfig,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Claude.to_string(),
            session: FileSessionConfig::default(),
            providers: FileProvidersConfig::default(),
        }
    }
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.default_provider()?;

        if self.session.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        if self.providers.bedrock.max_tokens == 0 {
            return Err(ConfigValidationError::InvalidMaxTokens);
        }

        let provider_config = self.to_provider_config();
        for kind in ProviderKind::ALL {
            if provider_config.model_for(kind).trim().is_empty() {
                return Err(ConfigValidationError::EmptyModelName(kind));
            }
        }

        Ok(())
    }

    /// Parse the configured default provider.
    pub fn default_provider(&self) -> Result<ProviderKind, ConfigValidationError> {
        self.provider
            .parse()
            .map_err(|_| ConfigValidationError::UnknownProvider(self.provider.clone()))
    }

    /// Convert into the serde-free domain configuration.
    pub fn to_provider_config(&self) -> ProviderConfig {
        let openai = &self.providers.openai;
        let bedrock = &self.providers.bedrock;
        ProviderConfig {
            default: self.default_provider().ok(),
            openai: OpenAiProviderConfig {
                api_key_env: openai.api_key_env.clone(),
                api_key: openai.api_key.clone(),
                base_url: openai.base_url.clone(),
                model: openai.model.clone(),
            },
            bedrock: BedrockProviderConfig {
                region: bedrock.region.clone(),
                profile: bedrock.profile.clone(),
                llama_model: bedrock.llama_model.clone(),
                claude_model: bedrock.claude_model.clone(),
                max_tokens: bedrock.max_tokens,
            },
        }
    }

    pub fn to_execution_params(&self) -> ExecutionParams {
        let session = &self.session;
        let retry = (session.max_retries > 0).then(|| {
            RetryPolicy::new(
                session.max_retries,
                Duration::from_millis(session.retry_base_delay_ms),
            )
        });
        ExecutionParams::default()
            .with_request_timeout(Some(Duration::from_secs(session.timeout_seconds)))
            .with_retry(retry)
    }
}
