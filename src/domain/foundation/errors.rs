//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction and input validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("Unknown value '{value}' for field '{field}'")]
    UnknownValue { field: String, value: String },
}

impl ValidationError {
    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an unknown vocabulary value error.
    pub fn unknown_value(field: impl Into<String>, value: impl Into<String>) -> Self {
        ValidationError::UnknownValue {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    InvalidFormat,
    UnknownValue,

    // Not found errors
    SessionNotFound,
    AttemptNotFound,

    // State errors
    AttemptAlreadyFinalized,
    InvalidMatchType,

    // Infrastructure errors
    ExportFailed,
    StorageError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::UnknownValue => "UNKNOWN_VALUE",
            ErrorCode::SessionNotFound => "SESSION_NOT_FOUND",
            ErrorCode::AttemptNotFound => "ATTEMPT_NOT_FOUND",
            ErrorCode::AttemptAlreadyFinalized => "ATTEMPT_ALREADY_FINALIZED",
            ErrorCode::InvalidMatchType => "INVALID_MATCH_TYPE",
            ErrorCode::ExportFailed => "EXPORT_FAILED",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

impl From<&ValidationError> for ErrorCode {
    fn from(err: &ValidationError) -> Self {
        match err {
            ValidationError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
            ValidationError::UnknownValue { .. } => ErrorCode::UnknownValue,
        }
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_unknown_value_displays_correctly() {
        let err = ValidationError::unknown_value("flags", "telepathy");
        assert_eq!(
            format!("{}", err),
            "Unknown value 'telepathy' for field 'flags'"
        );
    }

    #[test]
    fn validation_error_maps_to_error_code() {
        let err = ValidationError::invalid_format("age_years", "must be a number");
        assert_eq!(ErrorCode::from(&err), ErrorCode::InvalidFormat);
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::SessionNotFound, "Session not found");
        assert_eq!(format!("{}", err), "[SESSION_NOT_FOUND] Session not found");
    }

    #[test]
    fn domain_error_with_detail_adds_detail() {
        let err = DomainError::new(ErrorCode::StorageError, "write failed")
            .with_detail("session_id", "abc");
        assert_eq!(err.details.get("session_id"), Some(&"abc".to_string()));
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::AttemptNotFound), "ATTEMPT_NOT_FOUND");
        assert_eq!(format!("{}", ErrorCode::InternalError), "INTERNAL_ERROR");
    }
}
