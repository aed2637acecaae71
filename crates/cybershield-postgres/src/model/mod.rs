//! Diesel models for every table.

mod account;
mod vault_entry;

pub use self::account::{Account, NewAccount};
pub use self::vault_entry::{NewVaultEntry, VaultEntry};
