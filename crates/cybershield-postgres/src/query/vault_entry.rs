//! Vault entry repository.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::model::{NewVaultEntry, VaultEntry};
use crate::{PgConnection, PgError, PgResult, TRACING_TARGET_QUERY, schema};

/// Storage of per-account website passwords.
///
/// Every read and delete is scoped to an account, so an entry id alone
/// never reaches another account's data.
pub trait VaultEntryRepository {
    fn create_vault_entry(
        &mut self,
        new_entry: NewVaultEntry,
    ) -> impl Future<Output = PgResult<VaultEntry>> + Send;

    /// Lists an account's entries, oldest first.
    fn list_vault_entries(
        &mut self,
        account_id: Uuid,
    ) -> impl Future<Output = PgResult<Vec<VaultEntry>>> + Send;

    /// Deletes entry `entry_id` if it belongs to `account_id`.
    ///
    /// Returns whether a row was deleted.
    fn delete_vault_entry(
        &mut self,
        account_id: Uuid,
        entry_id: i64,
    ) -> impl Future<Output = PgResult<bool>> + Send;
}

impl VaultEntryRepository for PgConnection {
    async fn create_vault_entry(&mut self, mut new_entry: NewVaultEntry) -> PgResult<VaultEntry> {
        use schema::vault_entries;

        new_entry.website = new_entry.website.trim().to_owned();

        diesel::insert_into(vault_entries::table)
            .values(&new_entry)
            .returning(VaultEntry::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn list_vault_entries(&mut self, account_id: Uuid) -> PgResult<Vec<VaultEntry>> {
        use schema::vault_entries::{self, dsl};

        vault_entries::table
            .filter(dsl::account_id.eq(account_id))
            .order(dsl::id.asc())
            .select(VaultEntry::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }

    async fn delete_vault_entry(&mut self, account_id: Uuid, entry_id: i64) -> PgResult<bool> {
        use schema::vault_entries::{self, dsl};

        let deleted = diesel::delete(
            vault_entries::table
                .filter(dsl::id.eq(entry_id))
                .filter(dsl::account_id.eq(account_id)),
        )
        .execute(self)
        .await
        .map_err(PgError::from)?;

        tracing::debug!(
            target: TRACING_TARGET_QUERY,
            account_id = %account_id,
            entry_id,
            deleted,
            "Vault entry delete executed"
        );

        Ok(deleted > 0)
    }
}
