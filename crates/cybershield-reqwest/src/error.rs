//! Error types for article fetching.

use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias for article fetcher operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised while fetching an article.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid fetcher configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The article URL cannot be fetched.
    #[error("invalid article URL: {0}")]
    InvalidUrl(String),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// The site answered with a non-success status.
    #[error("article request returned {0}")]
    Status(StatusCode),

    /// The HTML parsing task did not complete.
    #[error("article parsing failed: {0}")]
    Parse(#[from] tokio::task::JoinError),
}

impl From<Error> for cybershield_core::Error {
    fn from(err: Error) -> Self {
        use cybershield_core::Error as CoreError;

        match err {
            Error::Config(message) => CoreError::configuration().with_message(message),
            Error::InvalidUrl(message) => CoreError::invalid_input().with_message(message),
            Error::Reqwest(e) if e.is_timeout() => {
                CoreError::timeout().with_message(e.to_string()).with_source(e)
            }
            Error::Reqwest(e) if e.is_connect() => CoreError::network_error()
                .with_message("connection failed")
                .with_source(e),
            Error::Reqwest(e) => CoreError::network_error()
                .with_message(e.to_string())
                .with_source(e),
            Error::Status(status) => {
                CoreError::external_error().with_message(format!("article request returned {status}"))
            }
            Error::Parse(e) => CoreError::internal_error()
                .with_message("article parsing failed")
                .with_source(e),
        }
    }
}
