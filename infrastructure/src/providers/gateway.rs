use super::ProviderAdapter;
use async_trait::async_trait;
use bridge_application::{ExecutionParams, GatewayError, LlmGateway};
use bridge_domain::{Message, ProviderKind};
use std::sync::Arc;
use tracing::{debug, warn};

/// Single-provider gateway: `format` → `invoke` → `extract` on one adapter.
///
/// The adapter is fixed at construction. Errors from any stage propagate
/// unchanged; there is no retry and no fallback reply.
pub struct AdapterGateway {
    adapter: Arc<dyn ProviderAdapter>,
    params: ExecutionParams,
}

impl AdapterGateway {
    pub fn new(adapter: Arc<dyn ProviderAdapter>, params: ExecutionParams) -> Self {
        Self { adapter, params }
    }

    pub fn params(&self) -> &ExecutionParams {
        &self.params
    }
}

#[async_trait]
impl LlmGateway for AdapterGateway {
    fn provider(&self) -> ProviderKind {
        self.adapter.kind()
    }

    fn model_id(&self) -> &str {
        self.adapter.model_id()
    }

    async fn send(&self, history: &[Message]) -> Result<String, GatewayError> {
        let provider = self.adapter.kind();
        let payload = self.adapter.format(history)?;

        debug!(
            provider = %provider,
            model = %self.adapter.model_id(),
            messages = history.len(),
            payload = payload.shape(),
            "Invoking provider"
        );

        let invocation = self.adapter.invoke(payload);
        let raw = match self.params.request_timeout {
            Some(limit) => tokio::time::timeout(limit, invocation)
                .await
                .map_err(|_| {
                    warn!(provider = %provider, timeout = ?limit, "Provider call timed out");
                    GatewayError::Timeout(limit)
                })?,
            None => invocation.await,
        }
        .inspect_err(|e| warn!(provider = %provider, error = %e, "Provider call failed"))?;

        let text = self.adapter.extract(&raw)?;
        debug!(
            provider = %provider,
            response_bytes = raw.len(),
            reply_chars = text.chars().count(),
            "Provider replied"
        );
        Ok(text)
    }
}
