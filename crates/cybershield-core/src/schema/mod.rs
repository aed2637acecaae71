//! Shape contracts for model output and the validator that enforces them.

mod contract;
mod error;
mod validator;

pub use self::contract::{
    Contract, EMAIL_CHECK_KEYS, FieldContract, FieldType, GENERATED_PASSWORD_COUNT,
    GENERATED_PASSWORD_MAX_CHARS, GENERATED_PASSWORD_MIN_CHARS, NEWS_CHECK_KEYS,
    PASSWORD_CRITERIA, PASSWORD_SYMBOLS, URL_CHECK_KEYS,
};
pub use self::error::{ValidationError, ValidationErrorKind};
pub use self::validator::validate;
