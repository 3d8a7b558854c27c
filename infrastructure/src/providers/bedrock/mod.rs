//! Managed inference gateway (AWS Bedrock `InvokeModel`) providers.
//!
//! Two backends with incompatible schemas share one transport:
//!
//! - `llama` folds the whole history into a single prompt string
//! - `claude` sends structured turns with block content

mod claude;
mod llama;
mod transport;
mod types;

pub use claude::{ANTHROPIC_VERSION, ClaudeAdapter};
pub use llama::{LlamaAdapter, fold_transcript};
pub use transport::BedrockRuntimeTransport;
