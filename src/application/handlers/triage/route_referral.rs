//! RouteReferralHandler - Routes a selection and records a pending attempt.

use std::sync::Arc;

use crate::domain::foundation::{AttemptId, SessionId};
use crate::domain::routing::{ClinicRouter, FlagPolicy, RoutingDecision, RoutingInput};
use crate::ports::TriageSessionRepository;

use super::{update_ledger, RoutingSelection, TriageError};

/// Command to route a referral within a session.
#[derive(Debug, Clone)]
pub struct RouteReferralCommand {
    pub session_id: SessionId,
    pub selection: RoutingSelection,
}

/// The recorded attempt, awaiting clinician judgment.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteReferralResult {
    pub attempt_id: AttemptId,
    pub input: RoutingInput,
    pub decision: RoutingDecision,
}

/// Handler for routing referrals within a session.
pub struct RouteReferralHandler {
    router: Arc<ClinicRouter>,
    flag_policy: FlagPolicy,
    repository: Arc<dyn TriageSessionRepository>,
}

impl RouteReferralHandler {
    pub fn new(
        router: Arc<ClinicRouter>,
        flag_policy: FlagPolicy,
        repository: Arc<dyn TriageSessionRepository>,
    ) -> Self {
        Self {
            router,
            flag_policy,
            repository,
        }
    }

    pub async fn handle(&self, cmd: RouteReferralCommand) -> Result<RouteReferralResult, TriageError> {
        // Validate before touching the session so a bad selection records nothing.
        let input = cmd.selection.into_input(self.flag_policy)?;
        let decision = self.router.route(&input);

        let (recorded_input, recorded_decision) = (input.clone(), decision.clone());
        let attempt_id = update_ledger(self.repository.as_ref(), cmd.session_id, move |ledger| {
            Ok(ledger.record_routing(recorded_input, recorded_decision))
        })
        .await?;

        tracing::info!(
            session_id = %cmd.session_id,
            attempt_id = %attempt_id,
            clinic = %decision.clinic,
            confidence = %decision.confidence,
            "Referral routed"
        );

        Ok(RouteReferralResult {
            attempt_id,
            input,
            decision,
        })
    }
}
