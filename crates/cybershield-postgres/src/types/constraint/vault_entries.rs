//! Vault entries table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum VaultEntryConstraints {
    #[strum(serialize = "vault_entries_website_not_empty")]
    WebsiteNotEmpty,
    #[strum(serialize = "vault_entries_website_length_max")]
    WebsiteLengthMax,
    #[strum(serialize = "vault_entries_ciphertext_length_min")]
    CiphertextLengthMin,
    #[strum(serialize = "vault_entries_account_id_fkey")]
    AccountForeignKey,
}

impl VaultEntryConstraints {
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    pub fn categorize(&self) -> ConstraintCategory {
        ConstraintCategory::Validation
    }
}

impl From<VaultEntryConstraints> for String {
    #[inline]
    fn from(val: VaultEntryConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for VaultEntryConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
