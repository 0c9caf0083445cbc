//! Triage session repository port.
//!
//! Holds one [`FeedbackLedger`] per session. Ledgers are never shared between
//! sessions. Writes to an existing session go through [`update`], which
//! applies the mutation while the session is held exclusively, so concurrent
//! requests against one session never overwrite each other.
//!
//! [`update`]: TriageSessionRepository::update

use async_trait::async_trait;

use crate::domain::feedback::FeedbackLedger;
use crate::domain::foundation::{DomainError, SessionId};

/// A change applied to one session's ledger in place.
pub type LedgerMutation<'a> = Box<dyn FnOnce(&mut FeedbackLedger) + Send + 'a>;

/// Repository port for per-session feedback ledgers.
#[async_trait]
pub trait TriageSessionRepository: Send + Sync {
    /// Store a new ledger, keyed by its session id.
    ///
    /// # Errors
    ///
    /// - `StorageError` on persistence failure
    async fn save(&self, ledger: &FeedbackLedger) -> Result<(), DomainError>;

    /// Find a session's ledger.
    ///
    /// Returns `None` if the session was never created.
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<FeedbackLedger>, DomainError>;

    /// Apply `mutation` to a session's ledger atomically.
    ///
    /// Returns `false`, without calling `mutation`, if the session doesn't
    /// exist.
    ///
    /// # Errors
    ///
    /// - `StorageError` on persistence failure
    async fn update(
        &self,
        id: &SessionId,
        mutation: LedgerMutation<'_>,
    ) -> Result<bool, DomainError>;

    /// Delete a session and its ledger.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session doesn't exist
    async fn delete(&self, id: &SessionId) -> Result<(), DomainError>;
}
