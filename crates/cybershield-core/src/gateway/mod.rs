//! Boundary to the external generative model.
//!
//! A [`ModelGateway`] wraps a [`ModelProvider`] and performs exactly one
//! provider call per invocation, bounded by a timeout. Every outcome is
//! folded into a [`RawModelOutput`]; nothing is retried or cached.

mod output;

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub use self::output::{FailureKind, GatewayFailure, RawModelOutput};
use crate::TRACING_TARGET_GATEWAY;
use crate::error::Result;
use crate::prompt::Prompt;

/// A generative model reachable over some transport.
///
/// Implementations return the model's text verbatim. They may apply
/// their own transport timeouts, but the gateway bound always applies.
#[async_trait::async_trait]
pub trait ModelProvider: Send + Sync {
    /// Name of the model answering prompts, for logs.
    fn model_name(&self) -> &str;

    /// Sends `prompt` and returns the model's text.
    async fn generate(&self, prompt: &Prompt) -> Result<String>;
}

/// Single-call, time-bounded access to a [`ModelProvider`].
#[derive(Clone)]
pub struct ModelGateway {
    provider: Arc<dyn ModelProvider>,
    timeout: Duration,
}

impl ModelGateway {
    /// Creates a gateway over `provider` with the given call bound.
    pub fn new<P>(provider: P, timeout: Duration) -> Self
    where
        P: ModelProvider + 'static,
    {
        Self::from_provider(Arc::new(provider), timeout)
    }

    /// Creates a gateway over a shared provider.
    pub fn from_provider(provider: Arc<dyn ModelProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    /// Returns the call bound.
    #[inline]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the model name reported by the provider.
    #[inline]
    pub fn model_name(&self) -> &str {
        self.provider.model_name()
    }

    /// Sends `prompt` once and waits at most [`timeout`](Self::timeout).
    ///
    /// Dropping the returned future abandons the provider call.
    pub async fn invoke(&self, prompt: &Prompt) -> RawModelOutput {
        let start = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET_GATEWAY,
            model = self.provider.model_name(),
            prompt_len = prompt.len(),
            timeout_ms = self.timeout.as_millis(),
            "invoking model"
        );

        let outcome = tokio::time::timeout(self.timeout, self.provider.generate(prompt)).await;
        let elapsed = start.elapsed();

        let output = match outcome {
            Ok(Ok(text)) => RawModelOutput::Success(text),
            Ok(Err(error)) => RawModelOutput::Failure(GatewayFailure::from(error)),
            Err(_) => RawModelOutput::Failure(GatewayFailure::new(
                FailureKind::Timeout,
                format!("no response within {}s", self.timeout.as_secs_f64()),
            )),
        };

        match &output {
            RawModelOutput::Success(text) => {
                tracing::debug!(
                    target: TRACING_TARGET_GATEWAY,
                    elapsed_ms = elapsed.as_millis(),
                    response_len = text.len(),
                    "model call succeeded"
                );
            }
            RawModelOutput::Failure(failure) => {
                tracing::error!(
                    target: TRACING_TARGET_GATEWAY,
                    elapsed_ms = elapsed.as_millis(),
                    failure_kind = failure.kind.as_ref(),
                    error = %failure,
                    "model call failed"
                );
            }
        }

        output
    }
}

impl fmt::Debug for ModelGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelGateway")
            .field("model", &self.provider.model_name())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::analysis::AnalysisRequest;
    use crate::mock::MockProvider;

    fn prompt() -> Prompt {
        Prompt::build(&AnalysisRequest::PasswordGeneration, None)
    }

    #[tokio::test]
    async fn success_returns_text_verbatim() {
        let provider = MockProvider::new().with_response("```json\n{}\n```");
        let gateway = ModelGateway::new(provider.clone(), Duration::from_secs(5));

        let output = gateway.invoke(&prompt()).await;
        assert_eq!(output, RawModelOutput::Success("```json\n{}\n```".into()));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn provider_error_is_folded_into_failure() {
        let provider = MockProvider::new().with_error(Error::rate_limited);
        let gateway = ModelGateway::new(provider.clone(), Duration::from_secs(5));

        let RawModelOutput::Failure(failure) = gateway.invoke(&prompt()).await else {
            panic!("expected failure");
        };
        assert_eq!(failure.kind, FailureKind::Provider);
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_provider_times_out() {
        let provider = MockProvider::new()
            .with_response("{}")
            .with_delay(Duration::from_secs(120));
        let gateway = ModelGateway::new(provider.clone(), Duration::from_secs(2));

        let RawModelOutput::Failure(failure) = gateway.invoke(&prompt()).await else {
            panic!("expected failure");
        };
        assert_eq!(failure.kind, FailureKind::Timeout);
        assert_eq!(failure.message, "no response within 2s");
        assert_eq!(provider.call_count(), 1);
    }
}
