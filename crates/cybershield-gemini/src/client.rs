//! HTTP client for the Gemini `generateContent` endpoint.

use std::sync::Arc;
use std::time::Instant;

use cybershield_core::Prompt;
use cybershield_core::gateway::ModelProvider;
use reqwest::Client;

use crate::TRACING_TARGET;
use crate::config::GeminiConfig;
use crate::error::{Error, Result};
use crate::types::{ApiErrorBody, GenerateContentRequest, GenerateContentResponse};

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-goog-api-key";

struct GeminiClientInner {
    http: Client,
    endpoint: String,
    config: GeminiConfig,
}

impl std::fmt::Debug for GeminiClientInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClientInner")
            .field("endpoint", &self.endpoint)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Gemini API client.
///
/// Cheap to clone; clones share the underlying connection pool.
///
/// ```rust,no_run
/// use cybershield_gemini::{GeminiClient, GeminiConfig};
///
/// # async fn run() -> cybershield_gemini::Result<()> {
/// let config = GeminiConfig::builder().with_api_key("my-api-key").build()?;
/// let client = GeminiClient::new(config)?;
///
/// let text = client.generate_content("Say hello as JSON").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct GeminiClient {
    inner: Arc<GeminiClientInner>,
}

impl GeminiClient {
    /// Creates a client from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: GeminiConfig) -> Result<Self> {
        tracing::debug!(
            target: TRACING_TARGET,
            model = config.model(),
            base_url = config.base_url(),
            timeout_ms = config.request_timeout().as_millis(),
            "Creating Gemini client"
        );

        let http = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(format!("cybershield/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        let inner = GeminiClientInner {
            http,
            endpoint: config.endpoint(),
            config,
        };

        tracing::info!(
            target: TRACING_TARGET,
            model = inner.config.model(),
            "Gemini client created"
        );

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &GeminiConfig {
        &self.inner.config
    }

    /// Sends `text` as a single user turn and returns the answer text.
    pub async fn generate_content(&self, text: &str) -> Result<String> {
        let started_at = Instant::now();
        let config = &self.inner.config;
        let body = GenerateContentRequest::new(text, config.temperature());

        let response = self
            .inner
            .http
            .post(&self.inner.endpoint)
            .header(API_KEY_HEADER, config.api_key())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let payload = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&payload)
                .map(|body| body.error.message)
                .unwrap_or_else(|_| payload.chars().take(512).collect());

            tracing::warn!(
                target: TRACING_TARGET,
                status = status.as_u16(),
                elapsed_ms = started_at.elapsed().as_millis(),
                error = %message,
                "Gemini request rejected"
            );

            return Err(Error::Api { status, message });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&payload)?;
        let usage = parsed.usage_metadata;
        let text = parsed.into_text()?;

        tracing::debug!(
            target: TRACING_TARGET,
            elapsed_ms = started_at.elapsed().as_millis(),
            response_len = text.len(),
            prompt_tokens = usage.and_then(|u| u.prompt_token_count),
            output_tokens = usage.and_then(|u| u.candidates_token_count),
            "Gemini request completed"
        );

        Ok(text)
    }
}

#[async_trait::async_trait]
impl ModelProvider for GeminiClient {
    fn model_name(&self) -> &str {
        self.inner.config.model()
    }

    async fn generate(&self, prompt: &Prompt) -> cybershield_core::Result<String> {
        Ok(self.generate_content(prompt.as_str()).await?)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use cybershield_core::ErrorKind;
    use cybershield_core::analysis::AnalysisRequest;

    use super::*;

    fn client(base_url: &str) -> anyhow::Result<GeminiClient> {
        let config = GeminiConfig::builder()
            .with_api_key("test-key")
            .with_base_url(base_url)
            .with_request_timeout(Duration::from_secs(2))
            .build()?;
        Ok(GeminiClient::new(config)?)
    }

    #[test]
    fn client_reports_configured_model() -> anyhow::Result<()> {
        let client = client("http://127.0.0.1:9")?;
        assert_eq!(client.model_name(), "gemini-2.0-flash-lite");
        assert_eq!(
            client.config().endpoint(),
            "http://127.0.0.1:9/models/gemini-2.0-flash-lite:generateContent"
        );
        Ok(())
    }

    #[tokio::test]
    async fn unreachable_host_is_network_error() -> anyhow::Result<()> {
        // Nothing listens on the discard port.
        let client = client("http://127.0.0.1:9")?;
        let prompt = Prompt::build(&AnalysisRequest::PasswordGeneration, None);

        let Err(error) = client.generate(&prompt).await else {
            panic!("expected a transport failure");
        };
        assert!(matches!(
            error.kind(),
            ErrorKind::NetworkError | ErrorKind::Timeout
        ));
        Ok(())
    }
}
