//! Per-request composition of prompt, gateway, sanitizer and validator.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::analysis::{AnalysisRequest, AnalysisResult, ApplicationError};
use crate::error::{Error, Result};
use crate::fetch::ArticleFetcher;
use crate::gateway::ModelGateway;
use crate::prompt::Prompt;
use crate::sanitize::sanitize;
use crate::{TRACING_TARGET_ORCHESTRATOR, schema};

/// Settings of the analysis pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct AnalyzerConfig {
    /// Upper bound on a single model call, in seconds.
    #[cfg_attr(
        feature = "config",
        arg(long = "model-timeout", env = "MODEL_TIMEOUT", default_value_t = 30)
    )]
    #[serde(default = "default_model_timeout")]
    pub model_timeout_secs: u64,
}

fn default_model_timeout() -> u64 {
    30
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            model_timeout_secs: default_model_timeout(),
        }
    }
}

impl AnalyzerConfig {
    /// Returns the model call bound.
    #[inline]
    pub fn model_timeout(&self) -> Duration {
        Duration::from_secs(self.model_timeout_secs)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(1..=300).contains(&self.model_timeout_secs) {
            return Err(Error::configuration().with_message(format!(
                "model timeout {}s is invalid, must be between 1 and 300 seconds",
                self.model_timeout_secs
            )));
        }
        Ok(())
    }
}

/// Runs analyses end to end.
///
/// Holds no per-request state; clones share the provider and fetcher.
#[derive(Clone)]
pub struct Analyzer {
    gateway: ModelGateway,
    fetcher: Arc<dyn ArticleFetcher>,
}

impl Analyzer {
    /// Creates an analyzer from a gateway and an article fetcher.
    pub fn new<F>(gateway: ModelGateway, fetcher: F) -> Self
    where
        F: ArticleFetcher + 'static,
    {
        Self::from_parts(gateway, Arc::new(fetcher))
    }

    /// Creates an analyzer from a gateway and a shared article fetcher.
    pub fn from_parts(gateway: ModelGateway, fetcher: Arc<dyn ArticleFetcher>) -> Self {
        Self { gateway, fetcher }
    }

    /// Returns the underlying gateway.
    #[inline]
    pub fn gateway(&self) -> &ModelGateway {
        &self.gateway
    }

    /// Runs `request` and returns a validated result.
    ///
    /// Input is checked first and no external call is made for invalid
    /// input. News checks fetch the article before the model is called.
    /// The model is called exactly once and its answer is either returned
    /// whole or rejected whole.
    pub async fn run(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResult, ApplicationError> {
        let kind = request.kind();
        request.validate()?;

        let article = if kind.requires_article() {
            let url = request.article_url().unwrap_or_default();
            Some(self.fetch_article(url).await?)
        } else {
            None
        };

        let prompt = Prompt::build(request, article.as_deref());
        let raw = self
            .gateway
            .invoke(&prompt)
            .await
            .into_result()
            .map_err(ApplicationError::ExternalServiceFailure)?;

        let sanitized = sanitize(&raw);
        let result = schema::validate(kind, &sanitized).inspect_err(|error| {
            tracing::warn!(
                target: TRACING_TARGET_ORCHESTRATOR,
                kind = %kind,
                error = %error,
                "model output failed validation"
            );
        })?;

        tracing::info!(
            target: TRACING_TARGET_ORCHESTRATOR,
            kind = %kind,
            "analysis completed"
        );

        Ok(result)
    }

    async fn fetch_article(&self, url: &str) -> Result<String, ApplicationError> {
        match self.fetcher.fetch(url).await {
            Ok(text) if !text.trim().is_empty() => Ok(text),
            Ok(_) => {
                tracing::warn!(
                    target: TRACING_TARGET_ORCHESTRATOR,
                    "article page contained no paragraph text"
                );
                Err(ApplicationError::ArticleUnavailable)
            }
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET_ORCHESTRATOR,
                    error = %error,
                    "article fetch failed"
                );
                Err(ApplicationError::ArticleUnavailable)
            }
        }
    }
}

impl fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Analyzer")
            .field("gateway", &self.gateway)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{
        EmailCheckInput, EmailVerdict, NewsCheckInput, PasswordAnalysisInput, UrlCheckInput,
    };
    use crate::gateway::FailureKind;
    use crate::mock::{MockFetcher, MockProvider};
    use crate::schema::{EMAIL_CHECK_KEYS, ValidationErrorKind};

    const PHISHING_REPLY: &str = r#"```json
{
  "verdict": "Phishing", "score": 97, "summary": "Lookalike sender demanding urgent verification.",
  "analysis": {
    "sender_address": "Warning: paypa1.com imitates paypal.com.",
    "subject_and_tone": "High Risk: threatens suspension.",
    "content_and_grammar": "Suspicious: generic and pushy.",
    "links_and_attachments": "Critical: unnamed 'Click here' link.",
    "malicious_intent": "Confirmed: pushes account verification."
  }
}
```"#;

    const NEWS_REPLY: &str = r#"{
  "verdict": "Not Verified", "confidence": 40, "summary": "No corroborating coverage found.",
  "details": {
    "source_reliability": "Unknown outlet.", "author_credibility": "No track record.",
    "claim_verification": "No matching wire reports.", "bias_and_language_analysis": "Mild."
  }
}"#;

    fn analyzer(provider: &MockProvider, fetcher: &MockFetcher) -> Analyzer {
        let gateway = ModelGateway::new(provider.clone(), Duration::from_secs(5));
        Analyzer::new(gateway, fetcher.clone())
    }

    fn phishing_request() -> AnalysisRequest {
        AnalysisRequest::EmailCheck(EmailCheckInput {
            from_email: "security@paypa1.com".into(),
            email_content: "Urgent! Verify your account now or it will be suspended. Click here."
                .into(),
        })
    }

    #[tokio::test]
    async fn email_check_end_to_end() -> anyhow::Result<()> {
        let provider = MockProvider::new().with_response(PHISHING_REPLY);
        let fetcher = MockFetcher::new();

        let result = analyzer(&provider, &fetcher).run(&phishing_request()).await?;

        assert_eq!(provider.call_count(), 1);
        assert_eq!(fetcher.call_count(), 0);
        let AnalysisResult::EmailCheck(email) = result else {
            anyhow::bail!("wrong variant");
        };
        assert_eq!(email.verdict, EmailVerdict::Phishing);
        assert!(email.score <= 100);

        let value = serde_json::to_value(&email)?;
        for key in EMAIL_CHECK_KEYS {
            assert!(value["analysis"][key].is_string(), "{key} missing");
        }
        Ok(())
    }

    #[tokio::test]
    async fn prompt_reaches_the_provider() -> anyhow::Result<()> {
        let provider = MockProvider::new().with_response(PHISHING_REPLY);
        let request = phishing_request();
        analyzer(&provider, &MockFetcher::new()).run(&request).await?;

        let expected = Prompt::build(&request, None);
        assert_eq!(provider.prompts(), [expected.as_str().to_owned()]);
        Ok(())
    }

    #[tokio::test]
    async fn invalid_input_makes_no_call() {
        let provider = MockProvider::new();
        let request = AnalysisRequest::UrlCheck(UrlCheckInput { url: String::new() });

        let error = analyzer(&provider, &MockFetcher::new())
            .run(&request)
            .await
            .unwrap_err();

        assert!(error.is_input_error());
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn provider_failure_is_external() {
        let provider = MockProvider::new().with_error(Error::service_unavailable);
        let request = AnalysisRequest::PasswordGeneration;

        let error = analyzer(&provider, &MockFetcher::new())
            .run(&request)
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            ApplicationError::ExternalServiceFailure(ref failure)
                if failure.kind == FailureKind::Provider
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn gateway_timeout_is_external() {
        let provider = MockProvider::new()
            .with_response("{}")
            .with_delay(Duration::from_secs(600));
        let gateway = ModelGateway::new(provider.clone(), Duration::from_secs(3));
        let analyzer = Analyzer::new(gateway, MockFetcher::new());

        let started = tokio::time::Instant::now();
        let error = analyzer
            .run(&AnalysisRequest::PasswordGeneration)
            .await
            .unwrap_err();

        assert!(started.elapsed() <= Duration::from_secs(4));
        assert!(matches!(
            error,
            ApplicationError::ExternalServiceFailure(ref failure)
                if failure.kind == FailureKind::Timeout
        ));
    }

    #[tokio::test]
    async fn invalid_output_is_rejected_whole() {
        let provider = MockProvider::new()
            .with_response(r#"{"analysis": {"Length": 5, "Variety": 9}}"#);
        let request = AnalysisRequest::PasswordAnalysis(PasswordAnalysisInput::new("hunter2"));

        let error = analyzer(&provider, &MockFetcher::new())
            .run(&request)
            .await
            .unwrap_err();

        let ApplicationError::InvalidModelOutput(validation) = error else {
            panic!("expected invalid model output");
        };
        assert_eq!(validation.field(), Some("analysis.Variety"));
    }

    #[tokio::test]
    async fn fenced_short_password_list_is_missing_an_entry() {
        let provider =
            MockProvider::new().with_response("```json\n{\"passwords\":[\"a\",\"b\"]}\n```");

        let error = analyzer(&provider, &MockFetcher::new())
            .run(&AnalysisRequest::PasswordGeneration)
            .await
            .unwrap_err();

        let ApplicationError::InvalidModelOutput(validation) = error else {
            panic!("expected invalid model output");
        };
        assert_eq!(validation.kind(), ValidationErrorKind::MissingField);
    }

    #[tokio::test]
    async fn news_check_embeds_fetched_article() -> anyhow::Result<()> {
        let provider = MockProvider::new().with_response(NEWS_REPLY);
        let fetcher = MockFetcher::new().with_article("The council approved the budget.");
        let request = AnalysisRequest::NewsCheck(NewsCheckInput {
            url: "https://news.example.org/budget".into(),
            ..NewsCheckInput::default()
        });

        let result = analyzer(&provider, &fetcher).run(&request).await?;

        assert_eq!(fetcher.call_count(), 1);
        assert!(matches!(result, AnalysisResult::NewsCheck(_)));
        let prompts = provider.prompts();
        assert!(prompts[0].contains("--- The council approved the budget. ---"));
        Ok(())
    }

    #[tokio::test]
    async fn missing_article_skips_the_model() {
        let provider = MockProvider::new().with_response(NEWS_REPLY);
        let request = AnalysisRequest::NewsCheck(NewsCheckInput {
            url: "https://news.example.org/gone".into(),
            ..NewsCheckInput::default()
        });

        for fetcher in [
            MockFetcher::new().with_error(Error::network_error),
            MockFetcher::new().with_article("  "),
        ] {
            let error = analyzer(&provider, &fetcher).run(&request).await.unwrap_err();
            assert_eq!(error, ApplicationError::ArticleUnavailable);
        }
        assert_eq!(provider.call_count(), 0);
    }

    #[test]
    fn config_bounds_the_timeout() {
        assert!(AnalyzerConfig::default().validate().is_ok());
        let config = AnalyzerConfig {
            model_timeout_secs: 0,
        };
        assert!(config.validate().is_err());
        assert_eq!(AnalyzerConfig::default().model_timeout(), Duration::from_secs(30));
    }
}
