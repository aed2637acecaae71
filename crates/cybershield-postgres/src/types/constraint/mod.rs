//! Database constraint violations, grouped by table.

mod accounts;
mod vault_entries;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use self::accounts::AccountConstraints;
pub use self::vault_entries::VaultEntryConstraints;

/// Any known constraint violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ConstraintViolation {
    Account(AccountConstraints),
    VaultEntry(VaultEntryConstraints),
}

/// Categories of constraint violations.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintCategory {
    /// Format, length and range checks.
    Validation,
    /// Timestamp ordering.
    Chronological,
    /// Unique indexes.
    Uniqueness,
}

impl ConstraintViolation {
    /// Parses a constraint name reported by PostgreSQL.
    ///
    /// ```
    /// use cybershield_postgres::types::{AccountConstraints, ConstraintViolation};
    ///
    /// let violation = ConstraintViolation::new("accounts_username_unique_idx");
    /// assert_eq!(
    ///     violation,
    ///     Some(ConstraintViolation::Account(AccountConstraints::UsernameUnique))
    /// );
    /// assert!(ConstraintViolation::new("unknown_constraint").is_none());
    /// ```
    pub fn new(constraint: &str) -> Option<Self> {
        if constraint.starts_with("accounts_") {
            AccountConstraints::new(constraint).map(Self::Account)
        } else if constraint.starts_with("vault_entries_") {
            VaultEntryConstraints::new(constraint).map(Self::VaultEntry)
        } else {
            None
        }
    }

    pub fn table_name(&self) -> &'static str {
        match self {
            Self::Account(_) => "accounts",
            Self::VaultEntry(_) => "vault_entries",
        }
    }

    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            Self::Account(c) => c.categorize(),
            Self::VaultEntry(c) => c.categorize(),
        }
    }

    /// Constraint name as known to PostgreSQL.
    pub fn constraint_name(&self) -> String {
        match self {
            Self::Account(c) => c.to_string(),
            Self::VaultEntry(c) => c.to_string(),
        }
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.constraint_name())
    }
}

impl From<ConstraintViolation> for String {
    #[inline]
    fn from(val: ConstraintViolation) -> Self {
        val.constraint_name()
    }
}

impl TryFrom<String> for ConstraintViolation {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value).ok_or_else(|| format!("unknown constraint: {value}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_indexes_are_recognized() {
        let email = ConstraintViolation::new("accounts_email_address_unique_idx");
        assert_eq!(
            email,
            Some(ConstraintViolation::Account(
                AccountConstraints::EmailAddressUnique
            ))
        );
        assert_eq!(
            email.map(|c| c.categorize()),
            Some(ConstraintCategory::Uniqueness)
        );
    }

    #[test]
    fn vault_constraints_are_recognized() {
        let violation = ConstraintViolation::new("vault_entries_website_not_empty");
        assert_eq!(violation.map(|c| c.table_name()), Some("vault_entries"));
    }

    #[test]
    fn serde_uses_constraint_names() -> anyhow::Result<()> {
        let violation = ConstraintViolation::Account(AccountConstraints::UsernameUnique);
        let json = serde_json::to_string(&violation)?;
        assert_eq!(json, "\"accounts_username_unique_idx\"");

        let parsed: ConstraintViolation = serde_json::from_str(&json)?;
        assert_eq!(parsed, violation);
        Ok(())
    }
}
