//! AddEdgeCaseHandler - Documents a presentation the cascade handles poorly.

use std::sync::Arc;

use crate::domain::foundation::{EdgeCaseId, SessionId};
use crate::ports::TriageSessionRepository;

use super::{update_ledger, TriageError};

/// Command to append an edge case to a session.
#[derive(Debug, Clone)]
pub struct AddEdgeCaseCommand {
    pub session_id: SessionId,
    pub description: String,
    pub challenge: String,
    pub decision: String,
}

/// Handler for adding edge cases.
pub struct AddEdgeCaseHandler {
    repository: Arc<dyn TriageSessionRepository>,
}

impl AddEdgeCaseHandler {
    pub fn new(repository: Arc<dyn TriageSessionRepository>) -> Self {
        Self { repository }
    }

    /// Returns `None` when the description is blank; nothing is stored.
    pub async fn handle(&self, cmd: AddEdgeCaseCommand) -> Result<Option<EdgeCaseId>, TriageError> {
        let AddEdgeCaseCommand {
            session_id,
            description,
            challenge,
            decision,
        } = cmd;
        let added = update_ledger(self.repository.as_ref(), session_id, move |ledger| {
            Ok(ledger.add_edge_case(&description, &challenge, &decision))
        })
        .await?;

        let Some(id) = added else {
            tracing::debug!(session_id = %session_id, "Blank edge case ignored");
            return Ok(None);
        };

        tracing::info!(session_id = %session_id, edge_case_id = %id, "Edge case documented");
        Ok(Some(id))
    }
}
