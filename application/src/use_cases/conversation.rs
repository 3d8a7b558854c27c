//! Conversation session use case.
//!
//! [`ConversationSession`] keeps an append-only history of messages and
//! drives one [`LlmGateway`] turn by turn. Each turn sends the *entire*
//! history, so turns on one session are strictly serialized: the history
//! lock is held from the user append until the assistant append (or the
//! failure), and readers of [`history`](ConversationSession::history) wait
//! for the in-flight turn to finish.
//!
//! A failed turn keeps its user message in history and adds no assistant
//! message, so the caller can retry, edit or abandon that prompt. A blank
//! reply counts as a failed turn: it is reported as
//! [`GatewayError::ResponseParse`] and never enters the history.

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use bridge_domain::{Conversation, DomainError, Message, ProviderKind};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Stateful multi-turn conversation bound to one gateway.
pub struct ConversationSession {
    gateway: Box<dyn LlmGateway>,
    history: Mutex<Conversation>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl ConversationSession {
    pub fn new(gateway: Box<dyn LlmGateway>) -> Self {
        Self {
            gateway,
            history: Mutex::new(Conversation::new()),
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Seed the history with a system message. Only meaningful before the first turn.
    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.history
            .get_mut()
            .push(Message::system(system_prompt));
        self
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn provider(&self) -> ProviderKind {
        self.gateway.provider()
    }

    /// Append `text` as a user message, send the history, append the reply.
    pub async fn send_turn(&self, text: &str) -> Result<String, GatewayError> {
        self.run_turn(text, None).await
    }

    /// [`send_turn`](Self::send_turn) that gives up when `cancel` fires.
    ///
    /// A cancelled turn behaves like any other failed turn.
    pub async fn send_turn_cancellable(
        &self,
        text: &str,
        cancel: &CancellationToken,
    ) -> Result<String, GatewayError> {
        self.run_turn(text, Some(cancel)).await
    }

    /// Ask a side question against the current history without recording it.
    ///
    /// Neither the question nor the reply is appended.
    pub async fn ask_detached(&self, text: &str) -> Result<String, GatewayError> {
        self.run_detached(text, None).await
    }

    /// [`ask_detached`](Self::ask_detached) that gives up when `cancel` fires.
    pub async fn ask_detached_cancellable(
        &self,
        text: &str,
        cancel: &CancellationToken,
    ) -> Result<String, GatewayError> {
        self.run_detached(text, Some(cancel)).await
    }

    /// Snapshot of the history in chronological order.
    pub async fn history(&self) -> Vec<Message> {
        self.history.lock().await.messages().to_vec()
    }

    /// Number of completed turns.
    pub async fn turn_count(&self) -> usize {
        self.history.lock().await.turn_count()
    }

    async fn run_turn(
        &self,
        text: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<String, GatewayError> {
        let content = non_empty(text)?;

        let mut history = self.history.lock().await;
        history.push(Message::user(content));

        debug!(
            provider = %self.gateway.provider(),
            messages = history.len(),
            "Sending conversation turn"
        );

        let result = self
            .dispatch(history.messages(), cancel)
            .await
            .and_then(|reply| self.reject_blank(reply));

        match result {
            Ok(reply) => {
                history.push(Message::assistant(reply.clone()));
                self.conversation_logger.log(ConversationEvent::new(
                    "turn_completed",
                    serde_json::json!({
                        "provider": self.gateway.provider().as_str(),
                        "model": self.gateway.model_id(),
                        "user": content,
                        "assistant": reply,
                        "history_len": history.len(),
                    }),
                ));
                Ok(reply)
            }
            Err(e) => {
                warn!(provider = %self.gateway.provider(), error = %e, "Conversation turn failed");
                self.conversation_logger.log(ConversationEvent::new(
                    "turn_failed",
                    serde_json::json!({
                        "provider": self.gateway.provider().as_str(),
                        "model": self.gateway.model_id(),
                        "user": content,
                        "error": e.to_string(),
                        "retryable": e.is_retryable(),
                        "history_len": history.len(),
                    }),
                ));
                Err(e)
            }
        }
    }

    async fn run_detached(
        &self,
        text: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<String, GatewayError> {
        let content = non_empty(text)?;
        let mut messages = self.history().await;
        messages.push(Message::user(content));
        self.dispatch(&messages, cancel).await
    }

    async fn dispatch(
        &self,
        messages: &[Message],
        cancel: Option<&CancellationToken>,
    ) -> Result<String, GatewayError> {
        match cancel {
            Some(token) => self.gateway.send_cancellable(messages, token).await,
            None => self.gateway.send(messages).await,
        }
    }

    /// Assistant messages in history are never blank.
    fn reject_blank(&self, reply: String) -> Result<String, GatewayError> {
        if reply.trim().is_empty() {
            return Err(GatewayError::response_parse(
                self.gateway.provider(),
                "backend returned an empty reply",
            ));
        }
        Ok(reply)
    }
}

fn non_empty(text: &str) -> Result<&str, GatewayError> {
    if text.trim().is_empty() {
        return Err(DomainError::EmptyContent.into());
    }
    Ok(text)
}
