//! Account constraint violation error handlers.

use cybershield_postgres::types::AccountConstraints;

use crate::handler::{Error, ErrorKind};

impl From<AccountConstraints> for Error<'static> {
    fn from(c: AccountConstraints) -> Self {
        let error = match c {
            AccountConstraints::UsernameNotEmpty => {
                ErrorKind::BadRequest.with_message("Username cannot be empty")
            }
            AccountConstraints::UsernameLengthMax => {
                ErrorKind::BadRequest.with_message("Username is too long")
            }
            AccountConstraints::EmailLengthMax => {
                ErrorKind::BadRequest.with_message("Email address is too long")
            }
            AccountConstraints::PasswordHashNotEmpty => {
                ErrorKind::BadRequest.with_message("Password cannot be empty")
            }
            AccountConstraints::UpdatedAfterCreated => ErrorKind::InternalServerError.into_error(),
            AccountConstraints::UsernameUnique => {
                ErrorKind::Conflict.with_message("Username already exists")
            }
            AccountConstraints::EmailAddressUnique => {
                ErrorKind::Conflict.with_message("Email address already registered")
            }
        };

        error.with_resource("account")
    }
}
