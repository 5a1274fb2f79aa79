//! Decode error types.

use crate::decode::JsonPath;
use serde_json::Value;
use thiserror::Error;

/// Errors raised while decoding a catalog metadata document.
///
/// Every variant except [`DecodeError::Json`] and
/// [`DecodeError::DocumentTooLarge`] carries the path of the offending value.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// A required field is absent.
    #[error("missing required field `{field}` of {entity} at {path}")]
    MissingField {
        /// Path of the record missing the field.
        path: JsonPath,
        /// Entity kind being decoded.
        entity: &'static str,
        /// External field name.
        field: &'static str,
    },

    /// A value is present but does not have the declared shape.
    #[error("invalid value at {path}: {reason}")]
    Shape {
        /// Path of the offending value.
        path: JsonPath,
        /// Human-readable reason.
        reason: String,
    },

    /// A well-shaped record breaks a field-level rule.
    #[error("invariant violated at {path}: {message}")]
    Invariant {
        /// Path of the offending record.
        path: JsonPath,
        /// Description of the violated rule.
        message: String,
    },

    /// The raw input is not valid JSON.
    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    /// The raw input exceeds the configured size limit.
    #[error("document of {size} bytes exceeds the limit of {limit} bytes")]
    DocumentTooLarge {
        /// Input size in bytes.
        size: usize,
        /// Configured limit in bytes.
        limit: usize,
    },
}

impl DecodeError {
    /// Create a shape error.
    pub fn shape(path: &JsonPath, reason: impl Into<String>) -> Self {
        DecodeError::Shape {
            path: path.clone(),
            reason: reason.into(),
        }
    }

    /// Create a shape error for a value of the wrong JSON type.
    pub fn expected(path: &JsonPath, expected: &str, found: &Value) -> Self {
        Self::shape(path, format!("expected {}, found {}", expected, describe(found)))
    }

    /// Create an invariant violation.
    pub fn invariant(path: &JsonPath, message: impl Into<String>) -> Self {
        DecodeError::Invariant {
            path: path.clone(),
            message: message.into(),
        }
    }

    /// Path of the offending value, if the error is tied to one.
    pub fn path(&self) -> Option<&JsonPath> {
        match self {
            DecodeError::MissingField { path, .. }
            | DecodeError::Shape { path, .. }
            | DecodeError::Invariant { path, .. } => Some(path),
            DecodeError::Json(_) | DecodeError::DocumentTooLarge { .. } => None,
        }
    }

    /// Check if this is an invariant violation rather than a shape error.
    pub fn is_invariant(&self) -> bool {
        matches!(self, DecodeError::Invariant { .. })
    }
}

/// Result type for decode operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Name the JSON type of a value for error messages.
pub(crate) fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
