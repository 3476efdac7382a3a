//! Tolerant readers for backend JSON where fields change type between records.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Read a JSON value as a finite number.
///
/// Numbers and numeric strings are accepted. Everything else, including
/// NaN and infinities hidden in strings, reads as `None`.
pub fn finite_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

/// Read a JSON value as a non-negative whole count.
pub fn count(value: &Value) -> Option<u64> {
    finite_number(value)
        .filter(|n| *n >= 0.0)
        .map(|n| n.round() as u64)
}

/// Read a JSON value as text. Numbers are stringified so numeric ids survive.
pub fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub(crate) fn de_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(finite_number(&value))
}

pub(crate) fn de_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(count(&value).unwrap_or(0))
}

pub(crate) fn de_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(text(&value))
}

pub(crate) fn de_text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(text(&value).unwrap_or_default())
}
