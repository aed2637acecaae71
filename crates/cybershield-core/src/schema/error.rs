use strum::{AsRefStr, IntoStaticStr};
use thiserror::Error;

/// Category of a [`ValidationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ValidationErrorKind {
    MalformedJson,
    MissingField,
    InvalidEnumValue,
    InvalidValue,
}

/// First contract violation found in a model response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The text is not a JSON object.
    #[error("malformed JSON: {reason}")]
    MalformedJson { reason: String },

    /// A required field (or array element) is absent or `null`.
    #[error("missing required field `{field}`")]
    MissingField { field: String },

    /// A closed-set field holds a value outside the set.
    #[error("field `{field}` has unexpected value {value}")]
    InvalidEnumValue { field: String, value: String },

    /// A field has the wrong type, is out of range, or has the wrong length.
    #[error("field `{field}` is invalid: {reason}")]
    InvalidValue { field: String, reason: String },
}

impl ValidationError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedJson {
            reason: reason.into(),
        }
    }

    pub(crate) fn missing(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns the category of this error.
    pub fn kind(&self) -> ValidationErrorKind {
        match self {
            Self::MalformedJson { .. } => ValidationErrorKind::MalformedJson,
            Self::MissingField { .. } => ValidationErrorKind::MissingField,
            Self::InvalidEnumValue { .. } => ValidationErrorKind::InvalidEnumValue,
            Self::InvalidValue { .. } => ValidationErrorKind::InvalidValue,
        }
    }

    /// Returns the dotted path of the offending field, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MalformedJson { .. } => None,
            Self::MissingField { field }
            | Self::InvalidEnumValue { field, .. }
            | Self::InvalidValue { field, .. } => Some(field),
        }
    }
}
