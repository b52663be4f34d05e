//! Tolerant field decoders for publisher data.
//!
//! Bulk sources disagree on encodings: the same ability score shows up as
//! `14`, `14.0`, `"14"` or `null` depending on who exported it. These
//! helpers are meant for `#[serde(default, deserialize_with = "...")]` and
//! never fail on a well-formed JSON value; anything they cannot make sense
//! of becomes `None` or empty.

use crate::rules;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decode an integer from a number, a numeric string, or null.
pub fn int<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(int_from_value(&value))
}

/// Decode free text. Numbers are stringified and arrays of strings or
/// `{ "name": ... }` objects are joined with `", "`.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(text_from_value(&value))
}

/// Decode a challenge rating given as a number or a display string
/// (`"1/4"`).
pub fn challenge_rating<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match &value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => rules::cr_to_double(text),
        _ => None,
    })
}

/// Decode a boolean flag from a bool, a number, or a `"true"`/`"yes"`
/// string.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match &value {
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => matches!(text.trim().to_lowercase().as_str(), "true" | "yes" | "1"),
        _ => false,
    })
}

/// Decode a list, treating any non-array value as empty and dropping
/// items that do not match `T`.
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };

    Ok(items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                tracing::debug!(index, error = %err, "dropping malformed list item");
                None
            }
        })
        .collect())
}

pub(crate) fn int_from_value(value: &Value) -> Option<i32> {
    match value {
        Value::Number(number) => match number.as_i64() {
            Some(n) => i32::try_from(n).ok(),
            None => number.as_f64().and_then(float_to_int),
        },
        Value::String(text) => int_from_text(text),
        _ => None,
    }
}

pub(crate) fn int_from_text(text: &str) -> Option<i32> {
    let text = text.trim();
    text.parse::<i32>()
        .ok()
        .or_else(|| text.parse::<f64>().ok().and_then(float_to_int))
}

pub(crate) fn text_from_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.trim().to_string(),
        Value::Number(number) => number.to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(text) => Some(text.trim().to_string()),
                Value::Object(fields) => fields
                    .get("name")
                    .and_then(Value::as_str)
                    .map(|name| name.trim().to_string()),
                _ => None,
            })
            .filter(|item| !item.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        _ => String::new(),
    }
}

fn float_to_int(value: f64) -> Option<i32> {
    (value.is_finite() && value.abs() <= i32::MAX as f64).then(|| value.trunc() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "int")]
        score: Option<i32>,
        #[serde(default, deserialize_with = "text")]
        label: String,
        #[serde(default, deserialize_with = "challenge_rating")]
        cr: Option<f64>,
        #[serde(default, deserialize_with = "flag")]
        hover: bool,
        #[serde(default, deserialize_with = "list")]
        items: Vec<Item>,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        name: String,
    }

    fn probe(value: Value) -> Probe {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_int_accepts_numbers_and_strings() {
        assert_eq!(probe(json!({ "score": 14 })).score, Some(14));
        assert_eq!(probe(json!({ "score": "14" })).score, Some(14));
        assert_eq!(probe(json!({ "score": " +3 " })).score, Some(3));
        assert_eq!(probe(json!({ "score": 12.9 })).score, Some(12));
        assert_eq!(probe(json!({ "score": "12.5" })).score, Some(12));
    }

    #[test]
    fn test_int_misses_become_none() {
        assert_eq!(probe(json!({})).score, None);
        assert_eq!(probe(json!({ "score": null })).score, None);
        assert_eq!(probe(json!({ "score": "" })).score, None);
        assert_eq!(probe(json!({ "score": "fourteen" })).score, None);
        assert_eq!(probe(json!({ "score": [14] })).score, None);
        assert_eq!(probe(json!({ "score": 9_999_999_999i64 })).score, None);
    }

    #[test]
    fn test_text_joins_arrays() {
        assert_eq!(probe(json!({ "label": " fire " })).label, "fire");
        assert_eq!(probe(json!({ "label": ["fire", "cold"] })).label, "fire, cold");
        assert_eq!(
            probe(json!({ "label": [{ "name": "Poisoned" }, { "index": "x" }] })).label,
            "Poisoned"
        );
        assert_eq!(probe(json!({ "label": null })).label, "");
        assert_eq!(probe(json!({ "label": 5 })).label, "5");
    }

    #[test]
    fn test_challenge_rating_forms() {
        assert_eq!(probe(json!({ "cr": "1/4" })).cr, Some(0.25));
        assert_eq!(probe(json!({ "cr": 0.5 })).cr, Some(0.5));
        assert_eq!(probe(json!({ "cr": 3 })).cr, Some(3.0));
        assert_eq!(probe(json!({ "cr": "?" })).cr, None);
    }

    #[test]
    fn test_flag_forms() {
        assert!(probe(json!({ "hover": true })).hover);
        assert!(probe(json!({ "hover": "Yes" })).hover);
        assert!(probe(json!({ "hover": 1 })).hover);
        assert!(!probe(json!({ "hover": null })).hover);
        assert!(!probe(json!({})).hover);
    }

    #[test]
    fn test_list_tolerates_bad_shapes() {
        assert!(probe(json!({ "items": "" })).items.is_empty());
        assert!(probe(json!({ "items": null })).items.is_empty());
        let items = probe(json!({ "items": [{ "name": "a" }, 7, { "name": "b" }] })).items;
        assert_eq!(
            items,
            vec![Item { name: "a".into() }, Item { name: "b".into() }]
        );
    }
}
