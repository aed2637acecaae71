//! Error types for the Gemini client.

use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias for Gemini client operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised while talking to the Gemini API.
#[derive(Debug, Error)]
pub enum Error {
    /// The client configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The request could not be sent or the response body could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Gemini API returned {status}: {message}")]
    Api { status: StatusCode, message: String },

    /// The prompt or the answer was blocked by safety filters.
    #[error("response blocked: {reason}")]
    Blocked { reason: String },

    /// The answer carried no text.
    #[error("response contained no text")]
    EmptyResponse,

    /// The response body was not the expected JSON.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<Error> for cybershield_core::Error {
    fn from(error: Error) -> Self {
        use cybershield_core::Error as CoreError;

        match error {
            Error::Config(message) => CoreError::configuration().with_message(message),
            Error::Http(e) if e.is_timeout() => CoreError::timeout()
                .with_message(e.to_string())
                .with_source(e),
            Error::Http(e) if e.is_connect() => CoreError::network_error()
                .with_message("connection failed")
                .with_source(e),
            Error::Http(e) => CoreError::network_error()
                .with_message(e.to_string())
                .with_source(e),
            Error::Api { status, message } => {
                let kind = match status {
                    StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => CoreError::authentication(),
                    StatusCode::TOO_MANY_REQUESTS => CoreError::rate_limited(),
                    status if status.is_server_error() => CoreError::service_unavailable(),
                    _ => CoreError::external_error(),
                };
                kind.with_message(format!("{status}: {message}"))
            }
            error @ (Error::Blocked { .. } | Error::EmptyResponse) => {
                CoreError::external_error().with_message(error.to_string())
            }
            Error::Decode(e) => CoreError::serialization()
                .with_message(e.to_string())
                .with_source(e),
        }
    }
}
