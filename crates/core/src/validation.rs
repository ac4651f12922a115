//! Request-level input checks shared by every endpoint.
//!
//! Handlers run these before touching the database so that incomplete or
//! unstorable input fails as a validation error instead of a write error.

use serde_json::Value;

use crate::error::CoreError;

/// Whether an optional text field holds a non-blank value.
pub fn present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Return the names of the fields flagged as not present.
pub fn missing_fields<'a>(fields: &[(&'a str, bool)]) -> Vec<&'a str> {
    fields
        .iter()
        .filter(|(_, is_present)| !is_present)
        .map(|(name, _)| *name)
        .collect()
}

/// Fail with a validation error listing every missing field, in order.
pub fn require_fields(fields: &[(&str, bool)]) -> Result<(), CoreError> {
    let missing = missing_fields(fields);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )))
    }
}

/// Reject text containing NUL characters, which Postgres cannot store.
pub fn ensure_no_nul(fields: &[(&str, Option<&str>)]) -> Result<(), CoreError> {
    match fields
        .iter()
        .find(|(_, value)| value.is_some_and(|v| v.contains('\0')))
    {
        Some((name, _)) => Err(nul_error(name)),
        None => Ok(()),
    }
}

/// Reject a JSON document with a NUL character in any string or object key.
pub fn ensure_json_no_nul(field: &str, value: &Value) -> Result<(), CoreError> {
    if json_contains_nul(value) {
        Err(nul_error(field))
    } else {
        Ok(())
    }
}

fn json_contains_nul(value: &Value) -> bool {
    match value {
        Value::String(s) => s.contains('\0'),
        Value::Array(items) => items.iter().any(json_contains_nul),
        Value::Object(map) => map
            .iter()
            .any(|(key, child)| key.contains('\0') || json_contains_nul(child)),
        Value::Null | Value::Bool(_) | Value::Number(_) => false,
    }
}

fn nul_error(field: &str) -> CoreError {
    CoreError::Validation(format!("{field} must not contain NUL characters"))
}
