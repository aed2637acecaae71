//! Vault entry constraint violation error handlers.

use cybershield_postgres::types::VaultEntryConstraints;

use crate::handler::{Error, ErrorKind};

impl From<VaultEntryConstraints> for Error<'static> {
    fn from(c: VaultEntryConstraints) -> Self {
        let error = match c {
            VaultEntryConstraints::WebsiteNotEmpty => {
                ErrorKind::BadRequest.with_message("Website cannot be empty")
            }
            VaultEntryConstraints::WebsiteLengthMax => {
                ErrorKind::BadRequest.with_message("Website is too long")
            }
            VaultEntryConstraints::AccountForeignKey => {
                ErrorKind::NotFound.with_message("User not found")
            }
            VaultEntryConstraints::CiphertextLengthMin => {
                ErrorKind::InternalServerError.into_error()
            }
        };

        error.with_resource("vault_entry")
    }
}
