//! Errors surfaced by triage command and query handlers.

use thiserror::Error;

use crate::domain::feedback::LedgerError;
use crate::domain::foundation::{DomainError, ErrorCode, SessionId, ValidationError};

/// Triage handler errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TriageError {
    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("Storage error: {0}")]
    Infrastructure(String),
}

impl TriageError {
    pub fn infrastructure(message: impl Into<String>) -> Self {
        TriageError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            TriageError::SessionNotFound(_) => ErrorCode::SessionNotFound,
            TriageError::Validation(err) => ErrorCode::from(err),
            TriageError::Ledger(err) => err.code(),
            TriageError::Infrastructure(_) => ErrorCode::StorageError,
        }
    }
}

impl From<DomainError> for TriageError {
    fn from(err: DomainError) -> Self {
        TriageError::Infrastructure(err.to_string())
    }
}
