//! Account password hashing and verification using Argon2id.

use std::sync::LazyLock;

use argon2::password_hash::{Error as ArgonError, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher as _, PasswordVerifier};
use rand::rngs::OsRng;

use crate::handler::{ErrorKind, Result};

const TRACING_TARGET: &str = "cybershield_server::service::password_hasher";

/// Hash verified against when a login names an unknown account.
static DUMMY_HASH: LazyLock<Option<String>> = LazyLock::new(|| {
    let salt = SaltString::try_from_rng(&mut OsRng).ok()?;
    Argon2::default()
        .hash_password(b"cybershield-unknown-account", &salt)
        .ok()
        .map(|hash| hash.to_string())
});

/// Argon2id hashing with default parameters and a random salt per hash.
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hashes `password` into a PHC string suitable for storage.
    pub fn hash_password(&self, password: &str) -> Result<String> {
        let salt = SaltString::try_from_rng(&mut OsRng).map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET,
                error = %e,
                "failed to generate password salt"
            );

            ErrorKind::InternalServerError
                .with_message("Password processing failed")
                .with_context("Salt generation error")
                .with_resource("account")
        })?;

        let password_hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %e,
                    "password hashing failed"
                );

                ErrorKind::InternalServerError
                    .with_message("Password processing failed")
                    .with_context("Hash generation error")
                    .with_resource("account")
            })?;

        Ok(password_hash.to_string())
    }

    /// Verifies `password` against a stored PHC string.
    ///
    /// A wrong password is `401 Invalid credentials`; a malformed stored
    /// hash is an internal error.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<()> {
        let parsed_hash = PasswordHash::new(stored_hash).map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET,
                error = %e,
                "stored password hash is malformed"
            );

            ErrorKind::InternalServerError
                .with_message("Authentication temporarily unavailable")
                .with_context("Hash format error")
                .with_resource("account")
        })?;

        match self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
        {
            Ok(()) => Ok(()),
            Err(ArgonError::Password) => {
                tracing::debug!(target: TRACING_TARGET, "password verification failed");
                Err(ErrorKind::Unauthorized
                    .with_message("Invalid credentials")
                    .with_resource("account"))
            }
            Err(e) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %e,
                    "password verification error"
                );

                Err(ErrorKind::InternalServerError
                    .with_message("Authentication temporarily unavailable")
                    .with_context("Verification error")
                    .with_resource("account"))
            }
        }
    }

    /// Spends one verification on a fixed hash and always fails.
    ///
    /// Called for unknown identifiers so that login takes as long as it
    /// does for a wrong password.
    pub fn verify_dummy_password(&self, password: &str) -> bool {
        if let Some(dummy_hash) = DUMMY_HASH.as_deref() {
            let _ = self.verify_password(password, dummy_hash);
        }

        false
    }
}
