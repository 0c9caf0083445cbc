//! Ledger-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | AttemptNotFound | 404 |
//! | AlreadyFinalized | 409 |
//! | InvalidMatchType | 400 |
//! | ExportFailed | 500 |

use thiserror::Error;

use crate::domain::foundation::{AttemptId, DomainError, ErrorCode};

/// Errors raised by [`FeedbackLedger`](super::FeedbackLedger) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Routing attempt not found: {0}")]
    AttemptNotFound(AttemptId),

    #[error("Routing attempt {0} already has clinician feedback")]
    AlreadyFinalized(AttemptId),

    #[error("A disagreement must be recorded as Disagree or Uncertain")]
    InvalidMatchType,

    #[error("Snapshot export failed: {0}")]
    ExportFailed(String),
}

impl LedgerError {
    pub fn export_failed(reason: impl Into<String>) -> Self {
        LedgerError::ExportFailed(reason.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            LedgerError::AttemptNotFound(_) => ErrorCode::AttemptNotFound,
            LedgerError::AlreadyFinalized(_) => ErrorCode::AttemptAlreadyFinalized,
            LedgerError::InvalidMatchType => ErrorCode::InvalidMatchType,
            LedgerError::ExportFailed(_) => ErrorCode::ExportFailed,
        }
    }
}

impl From<LedgerError> for DomainError {
    fn from(err: LedgerError) -> Self {
        let code = err.code();
        match &err {
            LedgerError::AttemptNotFound(id) | LedgerError::AlreadyFinalized(id) => {
                DomainError::new(code, err.to_string()).with_detail("attempt_id", id.to_string())
            }
            _ => DomainError::new(code, err.to_string()),
        }
    }
}
