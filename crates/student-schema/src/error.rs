//! Validation error types for the student-schema crate.
//!
//! A rejected request produces one `FieldError` per offending field. The
//! serialized shape (`loc`, `msg`, `type`, optional `ctx`) is what HTTP
//! clients see in the body of a 422 response.

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Machine-readable reason a field was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Required field absent (or `null`)
    Missing,
    /// Categorical value not in the enumerated set
    LiteralError,
    /// Score was not a number
    IntType,
    /// Score was a number with a fractional part
    IntFromFloat,
    /// Score below the lower bound
    GreaterThanEqual,
    /// Score above the upper bound
    LessThanEqual,
    /// Body was valid JSON but not an object
    ModelAttributesType,
    /// Body was not valid JSON
    JsonInvalid,
}

/// A single field-level rejection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    /// Location of the offending value, e.g. `["body", "lunch"]`
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ctx: Option<Value>,
}

impl FieldError {
    /// Error located at a named field of the request body
    pub fn field(field: &str, kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self {
            loc: vec!["body".to_string(), field.to_string()],
            msg: msg.into(),
            kind,
            ctx: None,
        }
    }

    /// Error about the request body as a whole
    pub fn body(kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self {
            loc: vec!["body".to_string()],
            msg: msg.into(),
            kind,
            ctx: None,
        }
    }

    pub fn with_ctx(mut self, ctx: Value) -> Self {
        self.ctx = Some(ctx);
        self
    }

    /// The field name, if this error points at one
    pub fn field_name(&self) -> Option<&str> {
        self.loc.get(1).map(String::as_str)
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.loc.join("."), self.msg)
    }
}

/// All field errors found in one request.
///
/// Never empty when returned from the validator.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid input ({} field error(s))", .errors.len())]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    pub fn single(error: FieldError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Find the first error reported against `field`
    pub fn for_field(&self, field: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field_name() == Some(field))
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }
}

/// Convenience type alias for validation results
pub type Result<T> = std::result::Result<T, ValidationErrors>;
