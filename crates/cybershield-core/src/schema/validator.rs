//! Contract-driven validation of sanitized model output.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::contract::{Contract, FieldContract, FieldType};
use super::error::ValidationError;
use crate::TRACING_TARGET_SCHEMA;
use crate::analysis::{AnalysisKind, AnalysisResult};

/// Parses `sanitized` and checks it against the contract for `kind`.
///
/// Fields are checked in contract order and the first violation is
/// returned. Fields the contract does not name are dropped before the
/// typed result is built, and no value is coerced into another type.
pub fn validate(kind: AnalysisKind, sanitized: &str) -> Result<AnalysisResult, ValidationError> {
    let value: Value = serde_json::from_str(sanitized)
        .map_err(|error| ValidationError::malformed(error.to_string()))?;

    let object = match value {
        Value::Object(object) => object,
        other => {
            return Err(ValidationError::malformed(format!(
                "expected a JSON object, found {}",
                type_name(&other)
            )));
        }
    };

    let contract = Contract::for_kind(kind);
    let checked = check_contract(contract, &object).inspect_err(|error| {
        tracing::debug!(
            target: TRACING_TARGET_SCHEMA,
            kind = %kind,
            error_kind = error.kind().as_ref(),
            field = error.field(),
            "model output rejected"
        );
    })?;

    let result = match kind {
        AnalysisKind::PasswordGeneration => AnalysisResult::PasswordGeneration(typed(checked)?),
        AnalysisKind::PasswordAnalysis => AnalysisResult::PasswordAnalysis(typed(checked)?),
        AnalysisKind::UrlCheck => AnalysisResult::UrlCheck(typed(checked)?),
        AnalysisKind::EmailCheck => AnalysisResult::EmailCheck(typed(checked)?),
        AnalysisKind::NewsCheck => AnalysisResult::NewsCheck(typed(checked)?),
    };

    Ok(result)
}

/// Checks every contract field and returns an object holding only them.
fn check_contract(
    contract: &Contract,
    object: &Map<String, Value>,
) -> Result<Map<String, Value>, ValidationError> {
    let mut checked = Map::with_capacity(contract.fields.len());
    for field in contract.fields {
        let value = required(object, field.name, field.name)?;
        let value = check_field(field, value)?;
        checked.insert(field.name.to_owned(), value);
    }
    Ok(checked)
}

fn check_field(field: &FieldContract, value: &Value) -> Result<Value, ValidationError> {
    let name = field.name;
    match field.field_type {
        FieldType::Text => text(name, value).map(Value::from),
        FieldType::Integer { min, max } => integer(name, value, min, max).map(Value::from),
        FieldType::OneOf(allowed) => one_of(name, value, allowed).map(Value::from),
        FieldType::PasswordList {
            count,
            min_chars,
            max_chars,
        } => {
            let Value::Array(items) = value else {
                return Err(type_mismatch(name, "an array", value));
            };
            if items.len() < count {
                return Err(ValidationError::missing(format!("{name}[{}]", items.len())));
            }
            if items.len() > count {
                return Err(ValidationError::invalid(
                    name,
                    format!("expected exactly {count} entries, found {}", items.len()),
                ));
            }

            let mut passwords = Vec::with_capacity(count);
            for index in 0..count {
                let path = format!("{name}[{index}]");
                let item = items
                    .get(index)
                    .filter(|item| !item.is_null())
                    .ok_or_else(|| ValidationError::missing(path.as_str()))?;
                let password = text(&path, item)?;
                check_password(&path, password, min_chars, max_chars)?;
                passwords.push(Value::from(password));
            }
            Ok(Value::Array(passwords))
        }
        FieldType::TextMap(keys) => {
            let nested = object(name, value)?;
            let mut checked = Map::with_capacity(keys.len());
            for key in keys {
                let path = format!("{name}.{key}");
                let value = required(nested, key, &path)?;
                checked.insert((*key).to_owned(), Value::from(text(&path, value)?));
            }
            Ok(Value::Object(checked))
        }
        FieldType::ScoreMap { keys, min, max } => {
            let nested = object(name, value)?;
            let mut checked = Map::with_capacity(keys.len());
            for key in keys {
                let path = format!("{name}.{key}");
                let value = required(nested, key, &path)?;
                checked.insert((*key).to_owned(), Value::from(integer(&path, value, min, max)?));
            }
            Ok(Value::Object(checked))
        }
    }
}

fn required<'a>(
    object: &'a Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<&'a Value, ValidationError> {
    match object.get(key) {
        None | Some(Value::Null) => Err(ValidationError::missing(path)),
        Some(value) => Ok(value),
    }
}

fn object<'a>(path: &str, value: &'a Value) -> Result<&'a Map<String, Value>, ValidationError> {
    value
        .as_object()
        .ok_or_else(|| type_mismatch(path, "an object", value))
}

fn text<'a>(path: &str, value: &'a Value) -> Result<&'a str, ValidationError> {
    value
        .as_str()
        .ok_or_else(|| type_mismatch(path, "a string", value))
}

fn integer(path: &str, value: &Value, min: i64, max: i64) -> Result<i64, ValidationError> {
    let number = value
        .as_i64()
        .ok_or_else(|| type_mismatch(path, "an integer", value))?;
    if !(min..=max).contains(&number) {
        return Err(ValidationError::invalid(
            path,
            format!("{number} is outside {min}..={max}"),
        ));
    }
    Ok(number)
}

fn one_of<'a>(
    path: &str,
    value: &Value,
    allowed: &'a [&'a str],
) -> Result<&'a str, ValidationError> {
    let candidate = text(path, value)?;
    allowed
        .iter()
        .find(|allowed| **allowed == candidate)
        .copied()
        .ok_or_else(|| ValidationError::InvalidEnumValue {
            field: path.to_owned(),
            value: value.to_string(),
        })
}

fn check_password(
    path: &str,
    password: &str,
    min_chars: usize,
    max_chars: usize,
) -> Result<(), ValidationError> {
    let length = password.chars().count();
    if !(min_chars..=max_chars).contains(&length) {
        return Err(ValidationError::invalid(
            path,
            format!("length {length} is outside {min_chars}..={max_chars}"),
        ));
    }

    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| c.is_ascii_punctuation());
    if !(has_lower && has_upper && has_digit && has_symbol) {
        return Err(ValidationError::invalid(
            path,
            "must mix lowercase, uppercase, digits and symbols",
        ));
    }

    Ok(())
}

fn typed<T: DeserializeOwned>(checked: Map<String, Value>) -> Result<T, ValidationError> {
    serde_json::from_value(Value::Object(checked))
        .map_err(|error| ValidationError::malformed(error.to_string()))
}

fn type_mismatch(path: &str, expected: &str, found: &Value) -> ValidationError {
    ValidationError::invalid(path, format!("expected {expected}, found {}", type_name(found)))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
