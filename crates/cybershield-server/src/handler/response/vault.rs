//! Password vault response types.

use serde::{Deserialize, Serialize};

/// A decrypted vault entry.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultPassword {
    pub id: i64,
    pub website: String,
    pub password: String,
}

/// Every entry stored for one account, oldest first.
#[must_use]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VaultPasswords {
    pub passwords: Vec<VaultPassword>,
}
