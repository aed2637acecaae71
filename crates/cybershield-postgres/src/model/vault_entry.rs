//! Password vault entry model.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::vault_entries;

/// A website password stored for an account.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = vault_entries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct VaultEntry {
    pub id: i64,
    pub account_id: Uuid,
    pub website: String,
    /// `nonce || ciphertext || tag`, never the plaintext.
    pub password_ciphertext: Vec<u8>,
    pub created_at: Timestamp,
}

/// Data for storing a vault entry.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = vault_entries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewVaultEntry {
    pub account_id: Uuid,
    pub website: String,
    pub password_ciphertext: Vec<u8>,
}
