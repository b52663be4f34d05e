//! Error types for creature import.
//!
//! Only document-level failures are returned as `Err`. A record that
//! cannot be decoded is reported as an `ImportError` inside the
//! `ImportReport` and the rest of the batch carries on.

use thiserror::Error;

/// Errors that can occur while importing publisher data.
///
/// # Examples
///
/// ```rust
/// use bestiary::ImportError;
///
/// let err = ImportError::Record { index: 3, message: "expected a JSON object".into() };
/// assert_eq!(err.to_string(), "Record 3 could not be decoded: expected a JSON object");
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ImportError {
    /// The document is not valid JSON.
    #[error("Invalid JSON document: {message}")]
    Json { message: String },

    /// The document is valid JSON but holds neither a record, a list of
    /// records, nor a page with a `results` list.
    #[error("Unexpected document shape: found {found}")]
    UnexpectedShape { found: &'static str },

    /// A single record could not be decoded into its publisher schema.
    #[error("Record {index} could not be decoded: {message}")]
    Record { index: usize, message: String },
}

impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::Json {
            message: err.to_string(),
        }
    }
}

/// Name a JSON value's kind for error messages.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
