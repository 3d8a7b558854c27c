//! Bedrock Runtime `InvokeModel` transport.
//!
//! Credentials come from the default AWS provider chain (optionally a
//! named profile); they are assumed to be established before any gateway
//! is built.

use crate::providers::transport::InvokeModelTransport;
use async_trait::async_trait;
use aws_sdk_bedrockruntime::Client as BedrockClient;
use aws_sdk_bedrockruntime::error::SdkError;
use aws_sdk_bedrockruntime::operation::invoke_model::InvokeModelError;
use aws_smithy_types::Blob;
use bridge_application::{TransportError, TransportErrorKind};
use bridge_domain::{BedrockProviderConfig, ProviderKind};
use std::sync::Arc;
use tracing::debug;

pub struct BedrockRuntimeTransport {
    client: Arc<BedrockClient>,
    provider: ProviderKind,
}

impl BedrockRuntimeTransport {
    /// Wrap an existing client. `provider` tags errors raised by this transport.
    pub fn new(client: Arc<BedrockClient>, provider: ProviderKind) -> Self {
        Self { client, provider }
    }

    /// Load AWS configuration for the configured region/profile and build a client.
    pub async fn from_config(config: &BedrockProviderConfig, provider: ProviderKind) -> Self {
        let mut aws_config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()));

        if let Some(ref profile) = config.profile {
            aws_config_loader = aws_config_loader.profile_name(profile);
        }

        let aws_config = aws_config_loader.load().await;
        Self::new(Arc::new(BedrockClient::new(&aws_config)), provider)
    }
}

#[async_trait]
impl InvokeModelTransport for BedrockRuntimeTransport {
    async fn invoke_model(&self, model_id: &str, body: Vec<u8>) -> Result<Vec<u8>, TransportError> {
        debug!(
            provider = %self.provider,
            model = %model_id,
            bytes = body.len(),
            "Calling Bedrock InvokeModel"
        );

        let output = self
            .client
            .invoke_model()
            .model_id(model_id)
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(body))
            .send()
            .await
            .map_err(|e| convert_invoke_error(self.provider, &e))?;

        Ok(output.body().as_ref().to_vec())
    }
}

/// Convert a Bedrock SDK error to a TransportError.
fn convert_invoke_error<R>(
    provider: ProviderKind,
    err: &SdkError<InvokeModelError, R>,
) -> TransportError
where
    R: std::fmt::Debug,
{
    match err {
        SdkError::ServiceError(service_err) => {
            let (kind, message) = match service_err.err() {
                InvokeModelError::ThrottlingException(e) => {
                    (TransportErrorKind::Throttled, e.to_string())
                }
                InvokeModelError::AccessDeniedException(e) => {
                    (TransportErrorKind::Authentication, e.to_string())
                }
                InvokeModelError::ServiceQuotaExceededException(e) => {
                    (TransportErrorKind::QuotaExceeded, e.to_string())
                }
                InvokeModelError::ModelNotReadyException(e) => {
                    (TransportErrorKind::ModelUnavailable, e.to_string())
                }
                InvokeModelError::ServiceUnavailableException(e) => {
                    (TransportErrorKind::ModelUnavailable, e.to_string())
                }
                InvokeModelError::ModelTimeoutException(e) => {
                    (TransportErrorKind::Timeout, e.to_string())
                }
                other => (TransportErrorKind::Backend, format!("{:?}", other)),
            };
            TransportError::new(provider, kind, message)
        }
        SdkError::TimeoutError(_) => {
            TransportError::new(provider, TransportErrorKind::Timeout, "Bedrock request timed out")
        }
        SdkError::DispatchFailure(_) => TransportError::new(
            provider,
            TransportErrorKind::Network,
            format!("Bedrock dispatch failure: {:?}", err),
        ),
        other => TransportError::new(
            provider,
            TransportErrorKind::Backend,
            format!("Bedrock SDK error: {:?}", other),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_bedrockruntime::types::error::{
        AccessDeniedException, ModelNotReadyException, ModelTimeoutException,
        ServiceQuotaExceededException, ServiceUnavailableException, ThrottlingException,
        ValidationException,
    };
    use aws_smithy_runtime_api::client::result::ConnectorError;

    fn classify(err: InvokeModelError) -> TransportError {
        let sdk_err: SdkError<InvokeModelError, ()> = SdkError::service_error(err, ());
        convert_invoke_error(ProviderKind::Claude, &sdk_err)
    }

    #[test]
    fn test_service_errors_map_to_kinds() {
        let cases = [
            (
                InvokeModelError::ThrottlingException(
                    ThrottlingException::builder().message("slow down").build(),
                ),
                TransportErrorKind::Throttled,
                true,
            ),
            (
                InvokeModelError::AccessDeniedException(
                    AccessDeniedException::builder().message("no access").build(),
                ),
                TransportErrorKind::Authentication,
                false,
            ),
            (
                InvokeModelError::ServiceQuotaExceededException(
                    ServiceQuotaExceededException::builder().message("quota").build(),
                ),
                TransportErrorKind::QuotaExceeded,
                false,
            ),
            (
                InvokeModelError::ModelNotReadyException(
                    ModelNotReadyException::builder().message("warming").build(),
                ),
                TransportErrorKind::ModelUnavailable,
                true,
            ),
            (
                InvokeModelError::ServiceUnavailableException(
                    ServiceUnavailableException::builder().message("down").build(),
                ),
                TransportErrorKind::ModelUnavailable,
                true,
            ),
            (
                InvokeModelError::ModelTimeoutException(
                    ModelTimeoutException::builder().message("too slow").build(),
                ),
                TransportErrorKind::Timeout,
                true,
            ),
            (
                InvokeModelError::ValidationException(
                    ValidationException::builder().message("bad body").build(),
                ),
                TransportErrorKind::Backend,
                false,
            ),
        ];

        for (err, kind, retryable) in cases {
            let converted = classify(err);
            assert_eq!(converted.kind, kind);
            assert_eq!(converted.is_retryable(), retryable, "{kind}");
            assert_eq!(converted.provider, ProviderKind::Claude);
        }
    }

    #[test]
    fn test_timeout_error_maps_to_timeout() {
        let sdk_err: SdkError<InvokeModelError, ()> = SdkError::timeout_error("deadline elapsed");
        let converted = convert_invoke_error(ProviderKind::Llama, &sdk_err);
        assert_eq!(converted.kind, TransportErrorKind::Timeout);
        assert!(converted.is_retryable());
        assert_eq!(converted.provider, ProviderKind::Llama);
    }

    #[test]
    fn test_dispatch_failure_maps_to_network() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset by peer");
        let sdk_err: SdkError<InvokeModelError, ()> =
            SdkError::dispatch_failure(ConnectorError::io(Box::new(io)));
        let converted = convert_invoke_error(ProviderKind::Claude, &sdk_err);
        assert_eq!(converted.kind, TransportErrorKind::Network);
        assert!(converted.is_retryable());
    }

    #[test]
    fn test_construction_failure_maps_to_backend() {
        let sdk_err: SdkError<InvokeModelError, ()> =
            SdkError::construction_failure("missing model id");
        let converted = convert_invoke_error(ProviderKind::Claude, &sdk_err);
        assert_eq!(converted.kind, TransportErrorKind::Backend);
        assert!(!converted.is_retryable());
    }
}
