//! Account password hashing and strength evaluation.

mod password_hasher;
mod password_strength;

pub use self::password_hasher::PasswordHasher;
pub use self::password_strength::{DEFAULT_MIN_SCORE, PasswordStrength, PasswordStrengthResult};
