//! Account response types.

use cybershield_postgres::model::Account;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Returned after a successful login.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggedIn {
    pub message: String,
    pub user_id: Uuid,
    pub username: String,
}

impl From<Account> for LoggedIn {
    fn from(account: Account) -> Self {
        Self {
            message: "Login successful".to_owned(),
            user_id: account.id,
            username: account.username,
        }
    }
}
