//! Wire error contract
//!
//! Every failed request is answered with an [`ErrorBody`]:
//!
//! ```json
//! {
//!   "error": "validation",
//!   "message": "name: must be at least 2 characters; price: must be >= 0",
//!   "fields": [
//!     { "field": "name", "message": "must be at least 2 characters" },
//!     { "field": "price", "message": "must be >= 0" }
//!   ]
//! }
//! ```
//!
//! | code | HTTP |
//! |------|------|
//! | `validation` | 400 |
//! | `unknown_action` | 400 |
//! | `not_found` | 404 |
//! | `exists` | 409 |
//! | `rate_limited` | 429 |
//! | `internal_error` | 500 |

use serde::{Deserialize, Serialize};
use std::fmt;

/// Machine-readable error code carried in the `error` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Malformed or missing fields
    Validation,
    /// Unknown product action
    UnknownAction,
    /// Unknown id or route
    NotFound,
    /// Duplicate category name
    Exists,
    /// Client exceeded its request budget
    RateLimited,
    /// Unexpected persistence failure
    InternalError,
}

impl ErrorCode {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::UnknownAction => "unknown_action",
            Self::NotFound => "not_found",
            Self::Exists => "exists",
            Self::RateLimited => "rate_limited",
            Self::InternalError => "internal_error",
        }
    }

    /// HTTP status code for this error code
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Validation | Self::UnknownAction => 400,
            Self::NotFound => 404,
            Self::Exists => 409,
            Self::RateLimited => 429,
            Self::InternalError => 500,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single failing field of a validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Present only for validation failures
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

impl ErrorBody {
    pub fn new(error: ErrorCode) -> Self {
        Self {
            error,
            message: None,
            fields: Vec::new(),
        }
    }

    pub fn with_message(error: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            error,
            message: Some(message.into()),
            fields: Vec::new(),
        }
    }

    pub fn with_fields(mut self, fields: Vec<FieldError>) -> Self {
        self.fields = fields;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorCode::UnknownAction).unwrap();
        assert_eq!(json, "\"unknown_action\"");
        let json = serde_json::to_string(&ErrorCode::InternalError).unwrap();
        assert_eq!(json, "\"internal_error\"");
    }

    #[test]
    fn test_error_code_status_mapping() {
        assert_eq!(ErrorCode::Validation.http_status(), 400);
        assert_eq!(ErrorCode::UnknownAction.http_status(), 400);
        assert_eq!(ErrorCode::NotFound.http_status(), 404);
        assert_eq!(ErrorCode::Exists.http_status(), 409);
        assert_eq!(ErrorCode::RateLimited.http_status(), 429);
        assert_eq!(ErrorCode::InternalError.http_status(), 500);
    }

    #[test]
    fn test_error_body_omits_empty_parts() {
        let body = ErrorBody::new(ErrorCode::NotFound);
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value, serde_json::json!({ "error": "not_found" }));
    }

    #[test]
    fn test_error_body_with_fields() {
        let body = ErrorBody::with_message(ErrorCode::Validation, "price: must be >= 0")
            .with_fields(vec![FieldError::new("price", "must be >= 0")]);
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["error"], "validation");
        assert_eq!(value["fields"][0]["field"], "price");
    }
}
