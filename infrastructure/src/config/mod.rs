//! Configuration file loading for llm-bridge
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `LLM_BRIDGE_*` environment variables (nested keys split on `__`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./llm-bridge.toml` or `./.llm-bridge.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/llm-bridge/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileBedrockConfig, FileConfig, FileOpenAiConfig, FileProvidersConfig,
    FileSessionConfig,
};
pub use loader::ConfigLoader;
