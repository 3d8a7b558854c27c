//! `gpt` provider adapter.

use super::types::{ChatCompletionRequest, ChatCompletionResponse};
use crate::providers::transport::ChatCompletionsTransport;
use crate::providers::{
    ChatTurn, ProviderAdapter, ProviderPayload, RawResponse, decode_body, encode_body,
    payload_mismatch,
};
use async_trait::async_trait;
use bridge_application::GatewayError;
use bridge_domain::{Message, ProviderKind};
use std::sync::Arc;

pub struct GptAdapter {
    transport: Arc<dyn ChatCompletionsTransport>,
    model: String,
}

impl GptAdapter {
    pub fn new(transport: Arc<dyn ChatCompletionsTransport>, model: impl Into<String>) -> Self {
        Self {
            transport,
            model: model.into(),
        }
    }
}

#[async_trait]
impl ProviderAdapter for GptAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gpt
    }

    fn model_id(&self) -> &str {
        &self.model
    }

    fn format(&self, history: &[Message]) -> Result<ProviderPayload, GatewayError> {
        Ok(ProviderPayload::Chat(
            history.iter().map(ChatTurn::from).collect(),
        ))
    }

    async fn invoke(&self, payload: ProviderPayload) -> Result<RawResponse, GatewayError> {
        let ProviderPayload::Chat(messages) = &payload else {
            return Err(payload_mismatch(self.kind(), &payload));
        };
        let body = encode_body(
            self.kind(),
            &ChatCompletionRequest {
                model: &self.model,
                messages,
            },
        )?;
        let raw = self.transport.post_chat_completions(body).await?;
        Ok(RawResponse::new(raw))
    }

    fn extract(&self, raw: &RawResponse) -> Result<String, GatewayError> {
        let response: ChatCompletionResponse = decode_body(self.kind(), raw)?;
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::response_parse(self.kind(), "response has no choices"))?;
        choice.message.content.ok_or_else(|| {
            GatewayError::response_parse(self.kind(), "first choice has no text content")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_application::{TransportError, TransportErrorKind};
    use std::sync::Mutex;

    /// Captures the request body and replies with a canned response.
    struct StubTransport {
        reply: Result<Vec<u8>, TransportError>,
        captured: Mutex<Option<serde_json::Value>>,
    }

    impl StubTransport {
        fn replying(body: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(body.as_bytes().to_vec()),
                captured: Mutex::new(None),
            })
        }

        fn failing(err: TransportError) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(err),
                captured: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl ChatCompletionsTransport for StubTransport {
        async fn post_chat_completions(&self, body: Vec<u8>) -> Result<Vec<u8>, TransportError> {
            *self.captured.lock().unwrap() = Some(serde_json::from_slice(&body).unwrap());
            self.reply.clone()
        }
    }

    fn adapter(transport: Arc<StubTransport>) -> GptAdapter {
        GptAdapter::new(transport, "gpt-4o")
    }

    #[test]
    fn format_single_user_message() {
        let payload = adapter(StubTransport::replying("{}"))
            .format(&[Message::user("hi")])
            .unwrap();
        let ProviderPayload::Chat(turns) = payload else {
            panic!("expected chat payload");
        };
        assert_eq!(
            serde_json::to_value(&turns).unwrap(),
            serde_json::json!([{"role": "user", "content": "hi"}])
        );
    }

    #[test]
    fn format_copies_every_role_verbatim() {
        let history = vec![
            Message::system("be brief"),
            Message::user("hi"),
            Message::assistant("hello"),
        ];
        let payload = adapter(StubTransport::replying("{}")).format(&history).unwrap();
        let ProviderPayload::Chat(turns) = payload else {
            panic!("expected chat payload");
        };
        let decoded: Vec<Message> = turns
            .iter()
            .map(|t| Message::new(t.role, t.content.clone()))
            .collect();
        assert_eq!(decoded, history);
    }

    #[test]
    fn format_empty_history() {
        let payload = adapter(StubTransport::replying("{}")).format(&[]).unwrap();
        assert_eq!(payload, ProviderPayload::Chat(vec![]));
    }

    #[tokio::test]
    async fn invoke_sends_model_and_messages() {
        let transport = StubTransport::replying(r#"{"choices":[]}"#);
        let gpt = adapter(transport.clone());
        let payload = gpt.format(&[Message::user("hi")]).unwrap();
        gpt.invoke(payload).await.unwrap();

        let sent = transport.captured.lock().unwrap().clone().unwrap();
        assert_eq!(
            sent,
            serde_json::json!({
                "model": "gpt-4o",
                "messages": [{"role": "user", "content": "hi"}]
            })
        );
    }

    #[tokio::test]
    async fn invoke_rejects_foreign_payload() {
        let gpt = adapter(StubTransport::replying("{}"));
        let err = gpt
            .invoke(ProviderPayload::Prompt("x".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Formatting(_)));
    }

    #[tokio::test]
    async fn invoke_surfaces_transport_error_unchanged() {
        let failure = TransportError::new(
            ProviderKind::Gpt,
            TransportErrorKind::Authentication,
            "invalid api key",
        )
        .with_status(401);
        let gpt = adapter(StubTransport::failing(failure.clone()));
        let err = gpt.invoke(ProviderPayload::Chat(vec![])).await.unwrap_err();
        assert_eq!(err, GatewayError::Transport(failure));
    }

    #[test]
    fn extract_reads_first_choice() {
        let gpt = adapter(StubTransport::replying("{}"));
        let raw = RawResponse::from(
            r#"{"choices":[{"message":{"role":"assistant","content":"first"}},{"message":{"content":"second"}}]}"#,
        );
        assert_eq!(gpt.extract(&raw).unwrap(), "first");
    }

    #[test]
    fn extract_rejects_malformed_responses() {
        let gpt = adapter(StubTransport::replying("{}"));
        for body in [
            "not json",
            r#"{"choices":[]}"#,
            r#"{"choices":[{"message":{"content":null}}]}"#,
            r#"{"id":"x"}"#,
        ] {
            let err = gpt.extract(&RawResponse::from(body)).unwrap_err();
            assert!(
                matches!(err, GatewayError::ResponseParse { provider: ProviderKind::Gpt, .. }),
                "body {body} gave {err:?}"
            );
        }
    }
}
