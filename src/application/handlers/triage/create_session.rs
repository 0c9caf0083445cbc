//! CreateTriageSessionHandler - Starts a new session with an empty ledger.

use std::sync::Arc;

use crate::domain::feedback::FeedbackLedger;
use crate::domain::foundation::{SessionId, Timestamp};
use crate::ports::TriageSessionRepository;

use super::TriageError;

/// Result of successful session creation.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTriageSessionResult {
    pub session_id: SessionId,
    pub created_at: Timestamp,
}

/// Handler for creating triage sessions.
pub struct CreateTriageSessionHandler {
    repository: Arc<dyn TriageSessionRepository>,
}

impl CreateTriageSessionHandler {
    pub fn new(repository: Arc<dyn TriageSessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self) -> Result<CreateTriageSessionResult, TriageError> {
        let ledger = FeedbackLedger::new(SessionId::new());
        self.repository.save(&ledger).await?;

        tracing::info!(session_id = %ledger.session_id(), "Triage session created");

        Ok(CreateTriageSessionResult {
            session_id: ledger.session_id(),
            created_at: ledger.created_at(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryTriageSessionRepository;
    use crate::domain::foundation::{DomainError, ErrorCode};
    use crate::ports::LedgerMutation;
    use async_trait::async_trait;

    struct FailingRepository;

    #[async_trait]
    impl TriageSessionRepository for FailingRepository {
        async fn save(&self, _ledger: &FeedbackLedger) -> Result<(), DomainError> {
            Err(DomainError::new(ErrorCode::StorageError, "Simulated save failure"))
        }

        async fn find_by_id(&self, _id: &SessionId) -> Result<Option<FeedbackLedger>, DomainError> {
            Ok(None)
        }

        async fn update(
            &self,
            _id: &SessionId,
            _mutation: LedgerMutation<'_>,
        ) -> Result<bool, DomainError> {
            Ok(false)
        }

        async fn delete(&self, _id: &SessionId) -> Result<(), DomainError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn creates_and_persists_empty_ledger() {
        let repo = Arc::new(InMemoryTriageSessionRepository::new());
        let handler = CreateTriageSessionHandler::new(repo.clone());

        let result = handler.handle().await.unwrap();

        let ledger = repo.find_by_id(&result.session_id).await.unwrap().unwrap();
        assert!(ledger.attempts().is_empty());
        assert_eq!(ledger.created_at(), result.created_at);
    }

    #[tokio::test]
    async fn each_call_creates_a_distinct_session() {
        let repo = Arc::new(InMemoryTriageSessionRepository::new());
        let handler = CreateTriageSessionHandler::new(repo.clone());

        let first = handler.handle().await.unwrap();
        let second = handler.handle().await.unwrap();
        assert_ne!(first.session_id, second.session_id);
        assert_eq!(repo.session_count().await, 2);
    }

    #[tokio::test]
    async fn storage_failure_is_reported() {
        let handler = CreateTriageSessionHandler::new(Arc::new(FailingRepository));
        let err = handler.handle().await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::StorageError);
    }
}
