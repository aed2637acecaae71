//! Configuration for the article fetcher.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Desktop browser user agent; many news sites refuse unknown clients.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.36";

/// Pages are read up to 2 MiB; anything past that is ignored.
pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Settings of [`HttpArticleFetcher`](crate::HttpArticleFetcher).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct FetcherConfig {
    /// Timeout for downloading one article, in seconds.
    #[cfg_attr(
        feature = "config",
        arg(
            long = "article-fetch-timeout",
            env = "ARTICLE_FETCH_TIMEOUT",
            default_value_t = 10
        )
    )]
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of characters of article text kept.
    #[cfg_attr(
        feature = "config",
        arg(long = "article-max-chars", env = "ARTICLE_MAX_CHARS", default_value_t = 4000)
    )]
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,

    /// Maximum number of bytes of HTML read from one response.
    #[cfg_attr(
        feature = "config",
        arg(
            long = "article-max-bytes",
            env = "ARTICLE_MAX_BYTES",
            default_value_t = DEFAULT_MAX_BODY_BYTES
        )
    )]
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// User-Agent header sent with article requests.
    #[cfg_attr(
        feature = "config",
        arg(
            long = "article-user-agent",
            env = "ARTICLE_USER_AGENT",
            default_value = BROWSER_USER_AGENT
        )
    )]
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_chars() -> usize {
    4000
}

fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

fn default_user_agent() -> String {
    BROWSER_USER_AGENT.to_owned()
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_chars: default_max_chars(),
            max_body_bytes: default_max_body_bytes(),
            user_agent: default_user_agent(),
        }
    }
}

impl FetcherConfig {
    /// Sets the download timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs();
        self
    }

    /// Sets the maximum number of characters kept.
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    /// Sets how many bytes of a page are read.
    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    /// Returns the download timeout.
    #[inline]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(1..=120).contains(&self.timeout_secs) {
            return Err(Error::Config(format!(
                "article fetch timeout must be between 1 and 120 seconds, got {}",
                self.timeout_secs
            )));
        }
        if self.max_chars == 0 {
            return Err(Error::Config("article max chars cannot be zero".into()));
        }
        if self.max_body_bytes == 0 {
            return Err(Error::Config("article max bytes cannot be zero".into()));
        }
        if self.user_agent.trim().is_empty() {
            return Err(Error::Config("user agent cannot be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = FetcherConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.max_chars, 4000);
        assert_eq!(config.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let zero_timeout = FetcherConfig::default().with_timeout(Duration::ZERO);
        assert!(zero_timeout.validate().is_err());

        let no_chars = FetcherConfig::default().with_max_chars(0);
        assert!(no_chars.validate().is_err());

        let no_bytes = FetcherConfig::default().with_max_body_bytes(0);
        assert!(no_bytes.validate().is_err());
    }
}
