//! In-memory triage session repository.
//!
//! Ledgers live only as long as the process, which is all a demonstration
//! session needs. Each session keeps its own ledger under its own key;
//! updates run under the map's write lock.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::feedback::FeedbackLedger;
use crate::domain::foundation::{DomainError, ErrorCode, SessionId};
use crate::ports::{LedgerMutation, TriageSessionRepository};

/// Process-local ledger store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTriageSessionRepository {
    ledgers: Arc<RwLock<HashMap<SessionId, FeedbackLedger>>>,
}

impl InMemoryTriageSessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions.
    pub async fn session_count(&self) -> usize {
        self.ledgers.read().await.len()
    }
}

#[async_trait]
impl TriageSessionRepository for InMemoryTriageSessionRepository {
    async fn save(&self, ledger: &FeedbackLedger) -> Result<(), DomainError> {
        self.ledgers
            .write()
            .await
            .insert(ledger.session_id(), ledger.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<FeedbackLedger>, DomainError> {
        Ok(self.ledgers.read().await.get(id).cloned())
    }

    async fn update(
        &self,
        id: &SessionId,
        mutation: LedgerMutation<'_>,
    ) -> Result<bool, DomainError> {
        let mut ledgers = self.ledgers.write().await;
        match ledgers.get_mut(id) {
            Some(ledger) => {
                mutation(ledger);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &SessionId) -> Result<(), DomainError> {
        match self.ledgers.write().await.remove(id) {
            Some(_) => Ok(()),
            None => Err(DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session not found: {}", id),
            )),
        }
    }
}
