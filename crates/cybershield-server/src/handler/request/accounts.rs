//! Account request bodies.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /api/register`.
#[must_use]
#[derive(Default, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterAccount {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub phone: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Body of `POST /api/login`.
#[must_use]
#[derive(Default, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoginAccount {
    /// Username or email address.
    #[validate(length(min = 1))]
    pub identifier: String,
    #[validate(length(min = 1))]
    pub password: String,
}

impl std::fmt::Debug for RegisterAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterAccount")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for LoginAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginAccount")
            .field("identifier", &self.identifier)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fields_fail_validation() -> anyhow::Result<()> {
        let body: RegisterAccount = serde_json::from_str(
            r#"{"username": "alice", "email": "", "phone": "555", "password": "x"}"#,
        )?;
        let errors = body.validate().err().map(|e| e.field_errors().len());
        assert_eq!(errors, Some(1));
        Ok(())
    }

    #[test]
    fn debug_omits_password() {
        let body = LoginAccount {
            identifier: "alice".into(),
            password: "hunter2".into(),
        };
        assert!(!format!("{body:?}").contains("hunter2"));
    }
}
