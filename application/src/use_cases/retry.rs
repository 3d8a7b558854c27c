//! Retrying gateway decorator.
//!
//! [`RetryingGateway`] wraps any [`LlmGateway`] and repeats a `send` whose
//! error reports [`is_retryable`](GatewayError::is_retryable), waiting an
//! exponentially growing delay between attempts. The history passed in is
//! resent unchanged, so a session turn still appends its user message once.

use crate::config::RetryPolicy;
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use async_trait::async_trait;
use bridge_domain::{Message, ProviderKind};
use tokio_util::sync::CancellationToken;
use tracing::warn;

pub struct RetryingGateway {
    inner: Box<dyn LlmGateway>,
    policy: RetryPolicy,
}

impl RetryingGateway {
    pub fn new(inner: Box<dyn LlmGateway>, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    async fn send_with_retry(
        &self,
        history: &[Message],
        cancel: Option<&CancellationToken>,
    ) -> Result<String, GatewayError> {
        let mut retry = 0;
        loop {
            let result = match cancel {
                Some(token) => self.inner.send_cancellable(history, token).await,
                None => self.inner.send(history).await,
            };

            let err = match result {
                Ok(reply) => return Ok(reply),
                Err(e) if e.is_retryable() && retry < self.policy.limit => e,
                Err(e) => return Err(e),
            };

            retry += 1;
            let delay = self.policy.delay_for(retry);
            warn!(
                provider = %self.inner.provider(),
                attempt = retry,
                limit = self.policy.limit,
                delay_ms = delay.as_millis() as u64,
                error = %err,
                "Retrying gateway call"
            );

            match cancel {
                Some(token) => {
                    tokio::select! {
                        biased;
                        _ = token.cancelled() => return Err(GatewayError::Cancelled),
                        _ = tokio::time::sleep(delay) => {}
                    }
                }
                None => tokio::time::sleep(delay).await,
            }
        }
    }
}

#[async_trait]
impl LlmGateway for RetryingGateway {
    fn provider(&self) -> ProviderKind {
        self.inner.provider()
    }

    fn model_id(&self) -> &str {
        self.inner.model_id()
    }

    async fn send(&self, history: &[Message]) -> Result<String, GatewayError> {
        self.send_with_retry(history, None).await
    }

    async fn send_cancellable(
        &self,
        history: &[Message],
        cancel: &CancellationToken,
    ) -> Result<String, GatewayError> {
        self.send_with_retry(history, Some(cancel)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_gateway::TransportErrorKind;
    use crate::use_cases::conversation::ConversationSession;
    use crate::use_cases::testing::{ScriptedGateway, throttled, transport_error};
    use std::time::Duration;

    fn fast_policy(limit: u32) -> RetryPolicy {
        RetryPolicy::new(limit, Duration::from_millis(1))
    }

    #[tokio::test]
    async fn throttled_then_ok_succeeds() {
        let scripted = ScriptedGateway::new(vec![
            Err(throttled()),
            Err(transport_error(TransportErrorKind::ModelUnavailable)),
            Ok("finally".to_string()),
        ]);
        let gateway = RetryingGateway::new(Box::new(scripted.clone()), fast_policy(3));

        let reply = gateway.send(&[Message::user("hi")]).await.unwrap();
        assert_eq!(reply, "finally");
        assert_eq!(scripted.seen().len(), 3);
        // Every attempt resends the identical history
        assert!(scripted.seen().iter().all(|h| h == &vec![Message::user("hi")]));
    }

    #[tokio::test]
    async fn authentication_fails_immediately() {
        let scripted = ScriptedGateway::new(vec![
            Err(transport_error(TransportErrorKind::Authentication)),
            Ok("never".to_string()),
        ]);
        let gateway = RetryingGateway::new(Box::new(scripted.clone()), fast_policy(5));

        let err = gateway.send(&[Message::user("hi")]).await.unwrap_err();
        assert_eq!(err, transport_error(TransportErrorKind::Authentication));
        assert_eq!(scripted.seen().len(), 1);
    }

    #[tokio::test]
    async fn gives_up_after_limit() {
        let scripted =
            ScriptedGateway::new(vec![Err(throttled()), Err(throttled()), Err(throttled())]);
        let gateway = RetryingGateway::new(Box::new(scripted.clone()), fast_policy(2));

        let err = gateway.send(&[Message::user("hi")]).await.unwrap_err();
        assert_eq!(err, throttled());
        assert_eq!(scripted.seen().len(), 3);
    }

    #[tokio::test]
    async fn cancellation_interrupts_backoff() {
        let scripted = ScriptedGateway::new(vec![Err(throttled()), Ok("late".to_string())]);
        let gateway = RetryingGateway::new(
            Box::new(scripted.clone()),
            RetryPolicy::new(3, Duration::from_secs(30)),
        );
        let cancel = CancellationToken::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            trigger.cancel();
        });

        let err = gateway
            .send_cancellable(&[Message::user("hi")], &cancel)
            .await
            .unwrap_err();
        assert!(err.is_cancelled());
        assert_eq!(scripted.seen().len(), 1);
    }

    #[tokio::test]
    async fn session_appends_user_message_once_across_retries() {
        let scripted = ScriptedGateway::new(vec![Err(throttled()), Ok("hello".to_string())]);
        let gateway = RetryingGateway::new(Box::new(scripted.clone()), fast_policy(3));
        let session = ConversationSession::new(Box::new(gateway));

        session.send_turn("hi").await.unwrap();
        assert_eq!(
            session.history().await,
            vec![Message::user("hi"), Message::assistant("hello")]
        );
        assert_eq!(scripted.seen().len(), 2);
    }
}
