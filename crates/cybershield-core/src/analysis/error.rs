use thiserror::Error;

use crate::gateway::GatewayFailure;
use crate::schema::ValidationError;

/// A caller mistake detected before any external call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// A required field was absent, empty or blank.
    #[error("{field} is required")]
    MissingField { field: &'static str },
}

impl InputError {
    /// Returns the name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field } => field,
        }
    }
}

/// Typed outcome of a failed analysis.
///
/// Every failure that can happen between receiving a request and returning
/// a result is converted into one of these variants; no transport or parse
/// error escapes the orchestrator unwrapped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplicationError {
    /// The request was rejected before contacting the model.
    #[error(transparent)]
    Input(#[from] InputError),

    /// The model call failed, timed out or was rejected by the provider.
    #[error("An error occurred with the AI model: {0}")]
    ExternalServiceFailure(#[from] GatewayFailure),

    /// The model answered, but the answer broke the schema contract.
    #[error("The AI model returned an invalid response: {0}")]
    InvalidModelOutput(#[from] ValidationError),

    /// The article behind a news check could not be retrieved.
    #[error("Failed to fetch or parse article content from the URL.")]
    ArticleUnavailable,
}

impl ApplicationError {
    /// Returns `true` if the failure was caused by the caller.
    #[inline]
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::Input(_))
    }

    /// Short machine-readable name of the failure category.
    pub fn kind_str(&self) -> &'static str {
        match self {
            Self::Input(_) => "input_error",
            Self::ExternalServiceFailure(_) => "external_service_failure",
            Self::InvalidModelOutput(_) => "invalid_model_output",
            Self::ArticleUnavailable => "article_unavailable",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::FailureKind;

    #[test]
    fn invalid_output_names_the_field() {
        let error = ApplicationError::from(ValidationError::InvalidEnumValue {
            field: "verdict".into(),
            value: "\"Unknown\"".into(),
        });
        let message = error.to_string();
        assert!(message.starts_with("The AI model returned an invalid response"));
        assert!(message.contains("verdict"));
    }

    #[test]
    fn gateway_failure_is_external() {
        let failure = GatewayFailure::new(FailureKind::Timeout, "no response within 30s");
        let error = ApplicationError::from(failure);
        assert_eq!(error.kind_str(), "external_service_failure");
        assert!(!error.is_input_error());
        assert!(error.to_string().contains("no response within 30s"));
    }

    #[test]
    fn input_error_is_transparent() {
        let error = ApplicationError::from(InputError::MissingField { field: "url" });
        assert_eq!(error.to_string(), "url is required");
        assert!(error.is_input_error());
    }
}
