//! Password vault request bodies.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /api/store-password`.
#[must_use]
#[derive(Default, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct StorePassword {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub website: String,
    #[validate(length(min = 1))]
    pub password: String,
}

impl std::fmt::Debug for StorePassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorePassword")
            .field("username", &self.username)
            .field("website", &self.website)
            .finish_non_exhaustive()
    }
}

/// Body of `DELETE /api/delete-password/{id}`.
#[must_use]
#[derive(Debug, Default, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DeletePassword {
    #[validate(length(min = 1))]
    pub username: String,
}
