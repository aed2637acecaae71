//! Analysis pipeline error to HTTP error conversion.

use cybershield_core::analysis::ApplicationError;

use crate::handler::{Error, ErrorKind};

const TRACING_TARGET: &str = "cybershield_server::analysis_errors";

impl From<ApplicationError> for Error<'static> {
    fn from(error: ApplicationError) -> Self {
        match error {
            ApplicationError::Input(input) => ErrorKind::BadRequest
                .with_message(input.to_string())
                .with_resource(input.field()),
            other => {
                tracing::error!(
                    target: TRACING_TARGET,
                    kind = other.kind_str(),
                    error = %other,
                    "analysis failed"
                );
                ErrorKind::InternalServerError
                    .with_message(other.to_string())
                    .with_resource("analysis")
            }
        }
    }
}
