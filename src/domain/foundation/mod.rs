//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary shared by routing and feedback.

mod errors;
mod ids;
mod percentage;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AttemptId, EdgeCaseId, SessionId};
pub use percentage::Percentage;
pub use timestamp::Timestamp;
