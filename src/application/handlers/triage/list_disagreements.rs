//! ListDisagreementsHandler - Non-match records for review.

use std::sync::Arc;

use crate::domain::feedback::FeedbackRecord;
use crate::domain::foundation::SessionId;
use crate::ports::TriageSessionRepository;

use super::{load_ledger, TriageError};

#[derive(Debug, Clone)]
pub struct ListDisagreementsQuery {
    pub session_id: SessionId,
}

pub struct ListDisagreementsHandler {
    repository: Arc<dyn TriageSessionRepository>,
}

impl ListDisagreementsHandler {
    pub fn new(repository: Arc<dyn TriageSessionRepository>) -> Self {
        Self { repository }
    }

    /// Records in insertion order.
    pub async fn handle(&self, query: ListDisagreementsQuery) -> Result<Vec<FeedbackRecord>, TriageError> {
        let ledger = load_ledger(self.repository.as_ref(), query.session_id).await?;
        Ok(ledger.list_disagreements().into_iter().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryTriageSessionRepository;

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let handler = ListDisagreementsHandler::new(Arc::new(InMemoryTriageSessionRepository::new()));
        let missing = SessionId::new();
        let err = handler
            .handle(ListDisagreementsQuery {
                session_id: missing,
            })
            .await
            .unwrap_err();
        assert_eq!(err, TriageError::SessionNotFound(missing));
    }
}
