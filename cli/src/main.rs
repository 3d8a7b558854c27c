//! CLI entrypoint for llm-bridge
//!
//! Wires configuration, the selected provider gateway and the
//! conversation session together.

mod cli;

use anyhow::{Context, Result};
use bridge_application::{ConversationSession, GatewayError, LlmGateway, RetryingGateway};
use bridge_domain::ProviderKind;
use bridge_infrastructure::{ConfigLoader, FileConfig, JsonlConversationLogger, create_gateway};
use clap::Parser;
use cli::Cli;
use std::future::Future;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if cli.show_config {
        print_config_locations();
        return Ok(());
    }

    let mut config: FileConfig = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };
    let provider = select_provider(&mut config, cli.provider)?;

    info!("Starting llm-bridge with provider {}", provider);

    // === Dependency Injection ===
    let params = config.to_execution_params();
    let gateway = create_gateway(
        provider.as_str(),
        &config.to_provider_config(),
        params.clone(),
    )
    .await?;

    let gateway: Box<dyn LlmGateway> = match params.retry {
        Some(policy) => Box::new(RetryingGateway::new(Box::new(gateway), policy)),
        None => Box::new(gateway),
    };

    let mut session = ConversationSession::new(gateway);

    if let Some(prompt) = cli.system.as_ref().or(config.session.system_prompt.as_ref()) {
        session = session.with_system_prompt(prompt.clone());
    }

    if let Some(path) = cli
        .conversation_log
        .as_ref()
        .or(config.session.conversation_log.as_ref())
    {
        match JsonlConversationLogger::new(path) {
            Some(logger) => session = session.with_conversation_logger(Arc::new(logger)),
            None => warn!("Conversation log disabled"),
        }
    }

    match cli.message {
        Some(message) => {
            let session = &session;
            let reply = with_interrupt(|cancel| async move {
                session.send_turn_cancellable(&message, &cancel).await
            })
            .await?;
            println!("{}", reply);
            Ok(())
        }
        None => run_repl(&session).await,
    }
}

/// Apply the command-line provider over the configured one, then validate.
fn select_provider(
    config: &mut FileConfig,
    requested: Option<ProviderKind>,
) -> Result<ProviderKind> {
    if let Some(kind) = requested {
        config.provider = kind.to_string();
    }
    config.validate().context("Invalid configuration")?;
    Ok(config.default_provider()?)
}

/// Read one turn per stdin line until EOF, `/quit` or Ctrl-C at the prompt.
async fn run_repl(session: &ConversationSession) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout
            .write_all(format!("{}> ", session.provider()).as_bytes())
            .await?;
        stdout.flush().await?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        };
        let Some(line) = line else {
            break;
        };
        let line = line.trim();

        if line.is_empty() {
            continue;
        }
        if line == "/quit" || line == "/exit" {
            break;
        }
        if line == "/history" {
            for message in session.history().await {
                println!("[{}] {}", message.role(), message.content());
            }
            continue;
        }

        let result = match line.strip_prefix("/ask ") {
            Some(question) => {
                with_interrupt(|cancel| async move {
                    session.ask_detached_cancellable(question, &cancel).await
                })
                .await
            }
            None => {
                with_interrupt(|cancel| async move {
                    session.send_turn_cancellable(line, &cancel).await
                })
                .await
            }
        };

        match result {
            Ok(reply) => println!("{}\n", reply),
            Err(GatewayError::Cancelled) => eprintln!("(interrupted)\n"),
            Err(e) => eprintln!("Error: {}\n", e),
        }
    }

    Ok(())
}

/// Run one gateway call, cancelling it if Ctrl-C arrives first.
async fn with_interrupt<F, Fut>(run: F) -> Result<String, GatewayError>
where
    F: FnOnce(CancellationToken) -> Fut,
    Fut: Future<Output = Result<String, GatewayError>>,
{
    let cancel = CancellationToken::new();
    let watcher = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        })
    };

    let result = run(cancel).await;
    watcher.abort();
    result
}

fn print_config_locations() {
    println!("Configuration files (in priority order):");
    println!("  LLM_BRIDGE_* environment variables");
    match ConfigLoader::project_config_path() {
        Some(path) => println!("  {} (found)", path.display()),
        None => println!("  ./llm-bridge.toml (not found)"),
    }
    match ConfigLoader::global_config_path() {
        Some(path) if path.exists() => println!("  {} (found)", path.display()),
        Some(path) => println!("  {} (not found)", path.display()),
        None => println!("  (no global config directory on this platform)"),
    }
}
