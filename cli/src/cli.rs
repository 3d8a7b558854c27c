//! CLI argument definitions

use bridge_domain::ProviderKind;
use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for llm-bridge
#[derive(Parser, Debug)]
#[command(name = "llm-bridge")]
#[command(author, version, about = "One conversation, three backends: gpt, llama and claude")]
#[command(long_about = r#"
llm-bridge keeps a single conversation history and sends it to the
selected backend on every turn.

Providers:
  gpt      OpenAI chat completions (OPENAI_API_KEY)
  llama    Meta Llama 3 on AWS Bedrock
  claude   Anthropic Claude 3 on AWS Bedrock

Configuration files are loaded from (in priority order):
1. LLM_BRIDGE_* environment variables
2. --config <path>           Explicit config file
3. ./llm-bridge.toml         Project-level config
4. ~/.config/llm-bridge/config.toml   Global config

Without a MESSAGE argument, lines are read from stdin, one turn per line.
  /ask <question>   side question that is not recorded
  /history          print the conversation so far
  /quit             exit

Example:
  llm-bridge --provider gpt "Summarize the borrow checker in one line"
  llm-bridge -p claude --system "Answer tersely."
"#)]
pub struct Cli {
    /// Send a single message and exit
    pub message: Option<String>,

    /// Backend to talk to (gpt, llama, claude); defaults to the configured provider
    #[arg(short, long, value_name = "PROVIDER")]
    pub provider: Option<ProviderKind>,

    /// System prompt for the conversation (overrides the config file)
    #[arg(short, long, value_name = "TEXT")]
    pub system: Option<String>,

    /// Append turn events to this JSONL file
    #[arg(long, value_name = "PATH")]
    pub conversation_log: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
