//! Gateway construction.
//!
//! Resolves a provider identifier once, then builds only the transport
//! that provider needs. Nothing is constructed for the other providers.

use super::bedrock::{BedrockRuntimeTransport, ClaudeAdapter, LlamaAdapter};
use super::gateway::AdapterGateway;
use super::openai::{GptAdapter, HttpChatTransport};
use super::ProviderAdapter;
use bridge_application::{ExecutionParams, GatewayError};
use bridge_domain::{ProviderConfig, ProviderKind};
use std::sync::Arc;
use tracing::info;

/// Build a gateway for `provider_id` (case-insensitive).
///
/// Unknown identifiers fail with [`GatewayError::UnsupportedProvider`]
/// before any client is created.
pub async fn create_gateway(
    provider_id: &str,
    config: &ProviderConfig,
    params: ExecutionParams,
) -> Result<AdapterGateway, GatewayError> {
    let kind: ProviderKind = provider_id.parse()?;
    let adapter = build_adapter(kind, config).await?;
    info!(provider = %kind, model = %adapter.model_id(), "Gateway ready");
    Ok(create_gateway_with_adapter(adapter, params))
}

/// Build a gateway around an already-constructed adapter.
pub fn create_gateway_with_adapter(
    adapter: Arc<dyn ProviderAdapter>,
    params: ExecutionParams,
) -> AdapterGateway {
    AdapterGateway::new(adapter, params)
}

async fn build_adapter(
    kind: ProviderKind,
    config: &ProviderConfig,
) -> Result<Arc<dyn ProviderAdapter>, GatewayError> {
    let model = config.model_for(kind).to_string();
    let adapter: Arc<dyn ProviderAdapter> = match kind {
        ProviderKind::Gpt => {
            let transport = HttpChatTransport::from_config(&config.openai)?;
            Arc::new(GptAdapter::new(Arc::new(transport), model))
        }
        ProviderKind::Llama => {
            let transport = BedrockRuntimeTransport::from_config(&config.bedrock, kind).await;
            Arc::new(LlamaAdapter::new(Arc::new(transport), model))
        }
        ProviderKind::Claude => {
            let transport = BedrockRuntimeTransport::from_config(&config.bedrock, kind).await;
            Arc::new(ClaudeAdapter::new(
                Arc::new(transport),
                model,
                config.bedrock.max_tokens,
            ))
        }
    };
    Ok(adapter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_application::{LlmGateway, TransportErrorKind};
    use bridge_domain::OpenAiProviderConfig;

    fn offline_config() -> ProviderConfig {
        ProviderConfig {
            openai: OpenAiProviderConfig {
                api_key: Some("sk-test".to_string()),
                api_key_env: "LLM_BRIDGE_TEST_NEVER_SET_KEY".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn unknown_provider_is_rejected() {
        for id in ["mistral", "gpt-4", "", "bedrock", "LLAMA2"] {
            let result = create_gateway(id, &offline_config(), ExecutionParams::default()).await;
            assert_eq!(
                result.err(),
                Some(GatewayError::UnsupportedProvider(id.to_string()))
            );
        }
    }

    #[tokio::test]
    async fn provider_id_is_case_folded() {
        for id in ["gpt", "GPT", "Gpt"] {
            let gateway = create_gateway(id, &offline_config(), ExecutionParams::default())
                .await
                .unwrap();
            assert_eq!(gateway.provider(), ProviderKind::Gpt);
            assert_eq!(gateway.model_id(), "gpt-4o");
        }
    }

    #[tokio::test]
    async fn gpt_without_api_key_fails_at_construction() {
        let mut config = offline_config();
        config.openai.api_key = None;

        let err = create_gateway("gpt", &config, ExecutionParams::default())
            .await
            .err()
            .unwrap();
        let GatewayError::Transport(transport) = err else {
            panic!("expected transport error, got {err:?}");
        };
        assert_eq!(transport.kind, TransportErrorKind::Authentication);
        assert_eq!(transport.provider, ProviderKind::Gpt);
    }

    #[tokio::test]
    async fn execution_params_are_carried() {
        let params = ExecutionParams::default().with_request_timeout(None);
        let gateway = create_gateway("gpt", &offline_config(), params.clone())
            .await
            .unwrap();
        assert_eq!(gateway.params(), &params);
    }
}
