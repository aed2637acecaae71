//! Application state and dependency injection.

mod config;
mod crypto;
mod security;
mod state;

pub use crate::error::{Error as ServiceError, ErrorKind as ServiceErrorKind, Result};
pub use crate::service::config::ServiceConfig;
pub use crate::service::crypto::{CryptoError, CryptoResult, VaultCipher, VaultKey};
pub use crate::service::security::{PasswordHasher, PasswordStrength, PasswordStrengthResult};
pub use crate::service::state::ServiceState;
