//! RecordDisagreementHandler - Records the clinician's corrected destination.

use std::sync::Arc;

use crate::domain::feedback::{CorrectedDestination, FeedbackRecord, MatchType};
use crate::domain::foundation::{AttemptId, SessionId};
use crate::ports::TriageSessionRepository;

use super::{update_ledger, TriageError};

/// Command to finalize an attempt as Disagree or Uncertain.
#[derive(Debug, Clone)]
pub struct RecordDisagreementCommand {
    pub session_id: SessionId,
    pub attempt_id: AttemptId,
    pub corrected_destination: CorrectedDestination,
    pub corrected_reasoning: Option<String>,
    pub match_type: MatchType,
}

/// Handler for recording disagreements.
pub struct RecordDisagreementHandler {
    repository: Arc<dyn TriageSessionRepository>,
}

impl RecordDisagreementHandler {
    pub fn new(repository: Arc<dyn TriageSessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: RecordDisagreementCommand) -> Result<FeedbackRecord, TriageError> {
        let RecordDisagreementCommand {
            session_id,
            attempt_id,
            corrected_destination,
            corrected_reasoning,
            match_type,
        } = cmd;
        let record = update_ledger(self.repository.as_ref(), session_id, move |ledger| {
            Ok(ledger
                .record_disagreement(attempt_id, corrected_destination, corrected_reasoning, match_type)?
                .clone())
        })
        .await?;

        tracing::info!(
            session_id = %session_id,
            attempt_id = %attempt_id,
            match_type = %record.match_type,
            routed_to = %record.decision.clinic,
            corrected_to = %record.corrected_destination,
            "Clinician feedback recorded"
        );

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryTriageSessionRepository;
    use crate::domain::feedback::{FeedbackLedger, LedgerError};
    use crate::domain::routing::{Clinic, ClinicRouter, PrimaryConcern, RoutingInput};

    async fn setup() -> (Arc<InMemoryTriageSessionRepository>, SessionId, AttemptId) {
        let repo = Arc::new(InMemoryTriageSessionRepository::new());
        let mut ledger = FeedbackLedger::new(SessionId::new());
        let input = RoutingInput::new(10.0, Some(PrimaryConcern::BehavioralProblems));
        let decision = ClinicRouter::default().route(&input);
        let attempt_id = ledger.record_routing(input, decision);
        repo.save(&ledger).await.unwrap();
        (repo, ledger.session_id(), attempt_id)
    }

    fn command(
        session_id: SessionId,
        attempt_id: AttemptId,
        match_type: MatchType,
    ) -> RecordDisagreementCommand {
        RecordDisagreementCommand {
            session_id,
            attempt_id,
            corrected_destination: CorrectedDestination::Clinic(Clinic::Ppc),
            corrected_reasoning: Some("Oppositional behavior with mood symptoms".to_string()),
            match_type,
        }
    }

    #[tokio::test]
    async fn disagreement_is_persisted_and_listed() {
        let (repo, session_id, attempt_id) = setup().await;
        let handler = RecordDisagreementHandler::new(repo.clone());

        let record = handler
            .handle(command(session_id, attempt_id, MatchType::Disagree))
            .await
            .unwrap();
        assert_eq!(
            record.corrected_destination,
            CorrectedDestination::Clinic(Clinic::Ppc)
        );

        let ledger = repo.find_by_id(&session_id).await.unwrap().unwrap();
        assert_eq!(ledger.list_disagreements().len(), 1);
    }

    #[tokio::test]
    async fn match_type_match_is_rejected() {
        let (repo, session_id, attempt_id) = setup().await;
        let handler = RecordDisagreementHandler::new(repo.clone());

        let err = handler
            .handle(command(session_id, attempt_id, MatchType::Match))
            .await
            .unwrap_err();
        assert_eq!(err, TriageError::Ledger(LedgerError::InvalidMatchType));

        let ledger = repo.find_by_id(&session_id).await.unwrap().unwrap();
        assert!(ledger.records().is_empty());
    }
}
