//! ConfirmMatchHandler - Records that the clinician agrees with the router.

use std::sync::Arc;

use crate::domain::feedback::FeedbackRecord;
use crate::domain::foundation::{AttemptId, SessionId};
use crate::ports::TriageSessionRepository;

use super::{update_ledger, TriageError};

/// Command to confirm a routing attempt as a Match.
#[derive(Debug, Clone)]
pub struct ConfirmMatchCommand {
    pub session_id: SessionId,
    pub attempt_id: AttemptId,
}

/// Handler for confirming matches.
pub struct ConfirmMatchHandler {
    repository: Arc<dyn TriageSessionRepository>,
}

impl ConfirmMatchHandler {
    pub fn new(repository: Arc<dyn TriageSessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: ConfirmMatchCommand) -> Result<FeedbackRecord, TriageError> {
        let attempt_id = cmd.attempt_id;
        let record = update_ledger(self.repository.as_ref(), cmd.session_id, move |ledger| {
            Ok(ledger.confirm_match(attempt_id)?.clone())
        })
        .await?;

        tracing::info!(
            session_id = %cmd.session_id,
            attempt_id = %cmd.attempt_id,
            clinic = %record.decision.clinic,
            "Routing confirmed as match"
        );

        Ok(record)
    }
}
