//! Structural validation of the serialized registry
//!
//! Validation runs against the raw JSON value before deserializing so that a
//! wrong shape is reported precisely instead of as a generic serde error.

use serde_json::{Number, Value};

use super::error::RegistryError;
use super::types::FavoritesRegistry;

const LIST_FIELDS: [&str; 2] = ["suites", "tools"];
const CAPACITY_FIELD: &str = "maxItems";

/// Parse and validate the serialized registry
///
/// # Errors
///
/// Returns `RegistryError::Parse` for text that is not JSON, and
/// `InvalidShape`/`InvalidCapacity` when the JSON does not describe a registry.
pub fn parse_registry(raw: &str) -> Result<FavoritesRegistry, RegistryError> {
    let value: Value = serde_json::from_str(raw)?;
    validate_value(&value)?;
    Ok(serde_json::from_value(value)?)
}

/// Capacity encoded by a JSON number
///
/// Accepts positive whole numbers, including ones written with a zero
/// fraction such as `8.0`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn capacity_from_number(n: &Number) -> Option<usize> {
    if let Some(max) = n.as_u64() {
        return usize::try_from(max).ok().filter(|&max| max > 0);
    }
    let max = n.as_f64()?;
    if max > 0.0 && max.fract() == 0.0 && max <= f64::from(u32::MAX) {
        return Some(max as usize);
    }
    None
}

/// Check that `value` is `{"suites": [string], "tools": [string], "maxItems": n}`
/// with `n` a positive whole number. Unknown extra fields are ignored.
///
/// # Errors
///
/// Returns the first violation found.
pub fn validate_value(value: &Value) -> Result<(), RegistryError> {
    let Some(object) = value.as_object() else {
        return Err(RegistryError::InvalidShape("expected a JSON object".into()));
    };

    for field in LIST_FIELDS {
        match object.get(field) {
            Some(Value::Array(items)) => {
                if !items.iter().all(Value::is_string) {
                    return Err(RegistryError::InvalidShape(format!(
                        "`{field}` must only contain strings"
                    )));
                }
            }
            _ => {
                return Err(RegistryError::InvalidShape(format!(
                    "`{field}` must be an array"
                )));
            }
        }
    }

    match object.get(CAPACITY_FIELD) {
        Some(Value::Number(n)) => match capacity_from_number(n) {
            Some(_) => Ok(()),
            None => Err(RegistryError::InvalidCapacity(n.to_string())),
        },
        _ => Err(RegistryError::InvalidShape(format!(
            "`{CAPACITY_FIELD}` must be a number"
        ))),
    }
}

/// Check a typed registry before it is written
///
/// # Errors
///
/// Returns `RegistryError::InvalidCapacity` when `max_items` is zero.
pub fn validate_registry(registry: &FavoritesRegistry) -> Result<(), RegistryError> {
    if registry.max_items == 0 {
        return Err(RegistryError::InvalidCapacity("0".into()));
    }
    Ok(())
}
