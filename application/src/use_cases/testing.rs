//! Gateway doubles shared by the use case tests.

use crate::ports::llm_gateway::{GatewayError, LlmGateway, TransportError, TransportErrorKind};
use async_trait::async_trait;
use bridge_domain::{Message, ProviderKind};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Replays scripted results and records every history it was sent.
#[derive(Clone)]
pub(crate) struct ScriptedGateway {
    responses: Arc<Mutex<VecDeque<Result<String, GatewayError>>>>,
    seen: Arc<Mutex<Vec<Vec<Message>>>>,
    delay: Duration,
}

impl ScriptedGateway {
    pub(crate) fn new(responses: Vec<Result<String, GatewayError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::from(responses))),
            seen: Arc::new(Mutex::new(Vec::new())),
            delay: Duration::ZERO,
        }
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub(crate) fn seen(&self) -> Vec<Vec<Message>> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    fn provider(&self) -> ProviderKind {
        ProviderKind::Claude
    }

    fn model_id(&self) -> &str {
        "scripted"
    }

    async fn send(&self, history: &[Message]) -> Result<String, GatewayError> {
        self.seen.lock().unwrap().push(history.to_vec());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Formatting("no more responses".to_string())))
    }
}

pub(crate) fn transport_error(kind: TransportErrorKind) -> GatewayError {
    TransportError::new(ProviderKind::Claude, kind, "scripted failure").into()
}

pub(crate) fn throttled() -> GatewayError {
    TransportError::new(ProviderKind::Claude, TransportErrorKind::Throttled, "slow down").into()
}
