//! DeleteSessionHandler - Discards a session and its ledger.

use std::sync::Arc;

use crate::domain::foundation::{ErrorCode, SessionId};
use crate::ports::TriageSessionRepository;

use super::TriageError;

#[derive(Debug, Clone)]
pub struct DeleteSessionCommand {
    pub session_id: SessionId,
}

pub struct DeleteSessionHandler {
    repository: Arc<dyn TriageSessionRepository>,
}

impl DeleteSessionHandler {
    pub fn new(repository: Arc<dyn TriageSessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeleteSessionCommand) -> Result<(), TriageError> {
        match self.repository.delete(&cmd.session_id).await {
            Ok(()) => {
                tracing::info!(session_id = %cmd.session_id, "Triage session deleted");
                Ok(())
            }
            Err(err) if err.code == ErrorCode::SessionNotFound => {
                Err(TriageError::SessionNotFound(cmd.session_id))
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryTriageSessionRepository;
    use crate::domain::feedback::FeedbackLedger;

    #[tokio::test]
    async fn deleted_session_is_gone() {
        let repo = Arc::new(InMemoryTriageSessionRepository::new());
        let ledger = FeedbackLedger::new(SessionId::new());
        repo.save(&ledger).await.unwrap();

        DeleteSessionHandler::new(repo.clone())
            .handle(DeleteSessionCommand {
                session_id: ledger.session_id(),
            })
            .await
            .unwrap();

        assert_eq!(repo.session_count().await, 0);
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let handler = DeleteSessionHandler::new(Arc::new(InMemoryTriageSessionRepository::new()));
        let missing = SessionId::new();

        let err = handler
            .handle(DeleteSessionCommand { session_id: missing })
            .await
            .unwrap_err();
        assert_eq!(err, TriageError::SessionNotFound(missing));
    }
}
