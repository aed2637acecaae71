//! Gemini client configuration.

use std::fmt;
use std::time::Duration;

use derive_builder::Builder;
use url::Url;

use crate::error::{Error, Result};

/// Default values for configuration options.
mod defaults {
    use std::time::Duration;

    /// Public Gemini REST endpoint.
    pub const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

    /// Model used when none is configured.
    pub const MODEL: &str = "gemini-2.0-flash-lite";

    /// Transport timeout for a single request.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Upper bound accepted for the transport timeout.
    pub const MAX_REQUEST_TIMEOUT: Duration = Duration::from_secs(300);
}

fn validate_config(builder: &GeminiConfigBuilder) -> std::result::Result<(), String> {
    if let Some(api_key) = &builder.api_key
        && api_key.trim().is_empty()
    {
        return Err("API key cannot be empty".to_owned());
    }

    if let Some(base_url) = &builder.base_url {
        let parsed = Url::parse(base_url).map_err(|e| format!("invalid base URL {base_url}: {e}"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(format!(
                "base URL must use http or https, got {}",
                parsed.scheme()
            ));
        }
    }

    if let Some(model) = &builder.model
        && model.trim().is_empty()
    {
        return Err("model name cannot be empty".to_owned());
    }

    if let Some(timeout) = builder.request_timeout
        && (timeout.is_zero() || timeout > defaults::MAX_REQUEST_TIMEOUT)
    {
        return Err(format!(
            "request timeout must be between 1ms and {}s, got {timeout:?}",
            defaults::MAX_REQUEST_TIMEOUT.as_secs()
        ));
    }

    if let Some(Some(temperature)) = builder.temperature
        && !(0.0..=2.0).contains(&temperature)
    {
        return Err(format!(
            "temperature must be between 0.0 and 2.0, got {temperature}"
        ));
    }

    Ok(())
}

/// Connection settings for [`GeminiClient`](crate::GeminiClient).
///
/// ```rust
/// use std::time::Duration;
/// use cybershield_gemini::GeminiConfig;
///
/// let config = GeminiConfig::builder()
///     .with_api_key("my-api-key")
///     .with_request_timeout(Duration::from_secs(20))
///     .build()?;
///
/// assert_eq!(config.model(), "gemini-2.0-flash-lite");
/// # Ok::<(), cybershield_gemini::Error>(())
/// ```
#[derive(Clone, Builder)]
#[builder(
    pattern = "owned",
    setter(into, strip_option, prefix = "with"),
    build_fn(private, name = "build_unchecked", validate = "validate_config")
)]
pub struct GeminiConfig {
    /// Key sent in the `x-goog-api-key` header.
    api_key: String,

    /// API root, without a trailing `/models` segment.
    #[builder(default = "defaults::BASE_URL.to_owned()")]
    base_url: String,

    #[builder(default = "defaults::MODEL.to_owned()")]
    model: String,

    /// Transport timeout for one `generateContent` request.
    #[builder(default = "defaults::REQUEST_TIMEOUT")]
    request_timeout: Duration,

    /// Sampling temperature; the model default applies when unset.
    #[builder(default)]
    temperature: Option<f32>,
}

impl GeminiConfigBuilder {
    /// Validates the settings and builds the configuration.
    pub fn build(self) -> Result<GeminiConfig> {
        self.build_unchecked()
            .map_err(|e| Error::Config(e.to_string()))
    }
}

impl GeminiConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> GeminiConfigBuilder {
        GeminiConfigBuilder::default()
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub fn temperature(&self) -> Option<f32> {
        self.temperature
    }

    /// Full `generateContent` URL for the configured model.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("request_timeout", &self.request_timeout)
            .field("temperature", &self.temperature)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply() -> anyhow::Result<()> {
        let config = GeminiConfig::builder().with_api_key("key").build()?;

        assert_eq!(config.base_url(), defaults::BASE_URL);
        assert_eq!(config.model(), "gemini-2.0-flash-lite");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.temperature(), None);
        Ok(())
    }

    #[test]
    fn endpoint_joins_base_and_model() -> anyhow::Result<()> {
        let config = GeminiConfig::builder()
            .with_api_key("key")
            .with_base_url("http://localhost:8080/v1beta/")
            .with_model("gemini-test")
            .build()?;

        assert_eq!(
            config.endpoint(),
            "http://localhost:8080/v1beta/models/gemini-test:generateContent"
        );
        Ok(())
    }

    #[test]
    fn missing_api_key_is_rejected() {
        let result = GeminiConfig::builder().build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn blank_api_key_is_rejected() {
        let result = GeminiConfig::builder().with_api_key("   ").build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let bad_url = GeminiConfig::builder()
            .with_api_key("key")
            .with_base_url("ftp://example.com")
            .build();
        assert!(bad_url.is_err());

        let zero_timeout = GeminiConfig::builder()
            .with_api_key("key")
            .with_request_timeout(Duration::ZERO)
            .build();
        assert!(zero_timeout.is_err());

        let hot = GeminiConfig::builder()
            .with_api_key("key")
            .with_temperature(3.5_f32)
            .build();
        assert!(hot.is_err());
    }

    #[test]
    fn debug_redacts_api_key() -> anyhow::Result<()> {
        let config = GeminiConfig::builder().with_api_key("secret-value").build()?;
        let rendered = format!("{config:?}");

        assert!(!rendered.contains("secret-value"));
        assert!(rendered.contains("[REDACTED]"));
        Ok(())
    }
}
