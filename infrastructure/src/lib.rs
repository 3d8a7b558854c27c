//! Infrastructure layer for llm-bridge
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the three provider adapters with their
//! transports, configuration file loading and the JSONL transcript logger.

pub mod config;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileBedrockConfig, FileConfig, FileOpenAiConfig,
    FileProvidersConfig, FileSessionConfig,
};
pub use logging::JsonlConversationLogger;
pub use providers::{
    ProviderAdapter,
    bedrock::{BedrockRuntimeTransport, ClaudeAdapter, LlamaAdapter},
    factory::{create_gateway, create_gateway_with_adapter},
    gateway::AdapterGateway,
    openai::{GptAdapter, HttpChatTransport},
    transport::{ChatCompletionsTransport, InvokeModelTransport},
};
