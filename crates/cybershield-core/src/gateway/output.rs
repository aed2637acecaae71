use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, IntoStaticStr};

use crate::error::{Error, ErrorKind};

/// Why a model call produced no usable text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, AsRefStr, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FailureKind {
    /// The provider could not be reached.
    Transport,
    /// The provider rejected the call or returned an unusable answer.
    Provider,
    /// The call did not finish within the gateway timeout.
    Timeout,
}

/// Human-readable cause of a failed model call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl GatewayFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for GatewayFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for GatewayFailure {}

impl From<Error> for GatewayFailure {
    fn from(error: Error) -> Self {
        let kind = match error.kind() {
            ErrorKind::Timeout => FailureKind::Timeout,
            ErrorKind::NetworkError => FailureKind::Transport,
            _ => FailureKind::Provider,
        };
        Self::new(kind, error.to_string())
    }
}

/// Text returned by a single model call, or the reason there is none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawModelOutput {
    Success(String),
    Failure(GatewayFailure),
}

impl RawModelOutput {
    /// Converts into a `Result`, keeping the failure cause.
    pub fn into_result(self) -> Result<String, GatewayFailure> {
        match self {
            Self::Success(text) => Ok(text),
            Self::Failure(failure) => Err(failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_errors_map_to_failure_kinds() {
        let timeout = GatewayFailure::from(Error::timeout());
        assert_eq!(timeout.kind, FailureKind::Timeout);

        let transport = GatewayFailure::from(Error::network_error().with_message("refused"));
        assert_eq!(transport.kind, FailureKind::Transport);
        assert_eq!(transport.message, "network_error: refused");

        let provider = GatewayFailure::from(Error::authentication());
        assert_eq!(provider.kind, FailureKind::Provider);
    }

    #[test]
    fn output_converts_into_result() {
        let ok = RawModelOutput::Success("{}".into());
        assert_eq!(ok.into_result(), Ok("{}".to_owned()));

        let failure = GatewayFailure::new(FailureKind::Provider, "blocked");
        let failed = RawModelOutput::Failure(failure.clone());
        assert_eq!(failed.into_result(), Err(failure));
    }
}
