//! Model provider and article fetcher configuration.

use std::fmt;
use std::time::Duration;

use anyhow::Context;
use clap::Args;
use cybershield_core::gateway::ModelGateway;
use cybershield_core::{Analyzer, AnalyzerConfig};
use cybershield_gemini::{GeminiClient, GeminiConfig};
use cybershield_reqwest::{FetcherConfig, HttpArticleFetcher};

use crate::TRACING_TARGET_CONFIG;

/// Gemini, article fetcher and analysis settings.
///
/// The API key has no default and is never logged.
#[derive(Clone, Args)]
#[must_use = "config does nothing unless you use it"]
pub struct ProviderConfig {
    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: String,

    /// Gemini model name
    #[arg(long, env = "GEMINI_MODEL", default_value = "gemini-2.0-flash-lite")]
    pub gemini_model: String,

    /// Gemini API root
    #[arg(long, env = "GEMINI_BASE_URL")]
    pub gemini_base_url: Option<String>,

    #[clap(flatten)]
    pub analyzer: AnalyzerConfig,

    #[clap(flatten)]
    pub fetcher: FetcherConfig,
}

impl ProviderConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        self.analyzer
            .validate()
            .context("invalid analyzer configuration")?;
        self.fetcher
            .validate()
            .context("invalid article fetcher configuration")?;
        Ok(())
    }

    /// Builds the Gemini configuration.
    ///
    /// The transport timeout matches the model timeout; the gateway bound
    /// applies on top of it.
    pub fn gemini_config(&self) -> anyhow::Result<GeminiConfig> {
        let mut builder = GeminiConfig::builder()
            .with_api_key(self.gemini_api_key.clone())
            .with_model(self.gemini_model.clone())
            .with_request_timeout(self.analyzer.model_timeout());

        if let Some(base_url) = &self.gemini_base_url {
            builder = builder.with_base_url(base_url.clone());
        }

        builder.build().context("invalid Gemini configuration")
    }

    /// Assembles the analysis pipeline from the configured provider and fetcher.
    pub fn create_analyzer(&self) -> anyhow::Result<Analyzer> {
        let client = GeminiClient::new(self.gemini_config()?)
            .context("failed to create Gemini client")?;
        let fetcher = HttpArticleFetcher::new(self.fetcher.clone())
            .context("failed to create article fetcher")?;

        let gateway = ModelGateway::new(client, self.model_timeout());
        Ok(Analyzer::new(gateway, fetcher))
    }

    #[inline]
    fn model_timeout(&self) -> Duration {
        self.analyzer.model_timeout()
    }

    /// Longest time one analysis can spend waiting on outside services.
    ///
    /// A news check downloads the article before calling the model.
    pub fn pipeline_timeout(&self) -> Duration {
        self.fetcher.timeout() + self.model_timeout()
    }

    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            model = %self.gemini_model,
            custom_base_url = self.gemini_base_url.is_some(),
            model_timeout_secs = self.analyzer.model_timeout_secs,
            article_fetch_timeout_secs = self.fetcher.timeout_secs,
            "Provider configuration"
        );
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("gemini_api_key", &"[REDACTED]")
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("analyzer", &self.analyzer)
            .field("fetcher", &self.fetcher)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ProviderConfig {
        ProviderConfig {
            gemini_api_key: "test-key".into(),
            gemini_model: "gemini-2.0-flash-lite".into(),
            gemini_base_url: None,
            analyzer: AnalyzerConfig::default(),
            fetcher: FetcherConfig::default(),
        }
    }

    #[test]
    fn debug_hides_api_key() {
        assert!(!format!("{:?}", config()).contains("test-key"));
    }

    #[test]
    fn gemini_timeout_follows_model_timeout() -> anyhow::Result<()> {
        let gemini = config().gemini_config()?;
        assert_eq!(gemini.request_timeout(), Duration::from_secs(30));
        Ok(())
    }

    #[test]
    fn pipeline_timeout_covers_fetch_and_model() {
        assert_eq!(config().pipeline_timeout(), Duration::from_secs(40));
    }

    #[test]
    fn blank_api_key_is_rejected() {
        let mut config = config();
        config.gemini_api_key = "  ".into();
        assert!(config.gemini_config().is_err());
    }
}
