//! GetSessionSummaryHandler - Totals and agreement rate for a session.

use std::sync::Arc;

use crate::domain::feedback::LedgerSummary;
use crate::domain::foundation::{SessionId, Timestamp};
use crate::ports::TriageSessionRepository;

use super::{load_ledger, TriageError};

/// Query for a session's summary.
#[derive(Debug, Clone)]
pub struct GetSessionSummaryQuery {
    pub session_id: SessionId,
}

/// Read model of a session's progress.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummaryView {
    pub session_id: SessionId,
    pub created_at: Timestamp,
    pub summary: LedgerSummary,
    pub routed: usize,
    pub pending: usize,
    pub disagreements: usize,
    pub edge_cases: usize,
}

/// Handler for session summary queries.
pub struct GetSessionSummaryHandler {
    repository: Arc<dyn TriageSessionRepository>,
}

impl GetSessionSummaryHandler {
    pub fn new(repository: Arc<dyn TriageSessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetSessionSummaryQuery) -> Result<SessionSummaryView, TriageError> {
        let ledger = load_ledger(self.repository.as_ref(), query.session_id).await?;

        Ok(SessionSummaryView {
            session_id: ledger.session_id(),
            created_at: ledger.created_at(),
            summary: ledger.summary(),
            routed: ledger.attempts().len(),
            pending: ledger.pending_attempts().len(),
            disagreements: ledger.list_disagreements().len(),
            edge_cases: ledger.edge_cases().len(),
        })
    }
}
