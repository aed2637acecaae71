//! Account repository.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::model::{Account, NewAccount};
use crate::{PgConnection, PgError, PgResult, TRACING_TARGET_QUERY, schema};

/// Account registration and lookup.
pub trait AccountRepository {
    /// Inserts a new account.
    ///
    /// Username and phone number are trimmed; the email address is trimmed
    /// and lowercased. Duplicate usernames or emails fail with a unique
    /// constraint violation.
    fn create_account(
        &mut self,
        new_account: NewAccount,
    ) -> impl Future<Output = PgResult<Account>> + Send;

    fn find_account_by_id(
        &mut self,
        account_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<Account>>> + Send;

    /// Finds an account by its exact username.
    fn find_account_by_username(
        &mut self,
        username: &str,
    ) -> impl Future<Output = PgResult<Option<Account>>> + Send;

    /// Finds an account whose username or email address equals `identifier`.
    ///
    /// Email comparison is case-insensitive.
    fn find_account_by_identifier(
        &mut self,
        identifier: &str,
    ) -> impl Future<Output = PgResult<Option<Account>>> + Send;
}

impl AccountRepository for PgConnection {
    async fn create_account(&mut self, mut new_account: NewAccount) -> PgResult<Account> {
        use schema::accounts;

        new_account.username = new_account.username.trim().to_owned();
        new_account.email_address = new_account.email_address.trim().to_lowercase();
        new_account.phone_number = new_account.phone_number.trim().to_owned();

        let account = diesel::insert_into(accounts::table)
            .values(&new_account)
            .returning(Account::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        tracing::debug!(
            target: TRACING_TARGET_QUERY,
            account_id = %account.id,
            "Account created"
        );

        Ok(account)
    }

    async fn find_account_by_id(&mut self, account_id: Uuid) -> PgResult<Option<Account>> {
        use schema::accounts::{self, dsl};

        accounts::table
            .filter(dsl::id.eq(account_id))
            .select(Account::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn find_account_by_username(&mut self, username: &str) -> PgResult<Option<Account>> {
        use schema::accounts::{self, dsl};

        accounts::table
            .filter(dsl::username.eq(username.trim()))
            .select(Account::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn find_account_by_identifier(&mut self, identifier: &str) -> PgResult<Option<Account>> {
        use schema::accounts::{self, dsl};

        let identifier = identifier.trim();
        accounts::table
            .filter(
                dsl::username
                    .eq(identifier)
                    .or(dsl::email_address.eq(identifier.to_lowercase())),
            )
            .order(dsl::created_at.asc())
            .select(Account::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }
}
