//! Vault cryptography error to HTTP error conversion.

use crate::handler::{Error, ErrorKind};
use crate::service::CryptoError;

const TRACING_TARGET: &str = "cybershield_server::vault_crypto";

impl From<CryptoError> for Error<'static> {
    fn from(error: CryptoError) -> Self {
        tracing::error!(
            target: TRACING_TARGET,
            error = %error,
            "vault cryptography failed"
        );

        ErrorKind::InternalServerError
            .with_message("Password vault is temporarily unavailable")
            .with_resource("vault_entry")
    }
}
