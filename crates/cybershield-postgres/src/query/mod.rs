//! Repository traits implemented for pooled connections.

pub mod account;
pub mod vault_entry;

pub use self::account::AccountRepository;
pub use self::vault_entry::VaultEntryRepository;
