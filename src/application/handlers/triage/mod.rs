//! Triage command and query handlers.
//!
//! Each handler composes the router and a session's ledger the way a triage
//! screen does: collect the selection, route, show the decision, and
//! optionally record the clinician's judgment.

mod add_edge_case;
mod confirm_match;
mod create_session;
mod delete_session;
mod errors;
mod export_session;
mod get_session_summary;
mod list_disagreements;
mod preview_routing;
mod record_disagreement;
mod route_referral;

pub use add_edge_case::{AddEdgeCaseCommand, AddEdgeCaseHandler};
pub use confirm_match::{ConfirmMatchCommand, ConfirmMatchHandler};
pub use create_session::{CreateTriageSessionHandler, CreateTriageSessionResult};
pub use delete_session::{DeleteSessionCommand, DeleteSessionHandler};
pub use errors::TriageError;
pub use export_session::{ExportSessionHandler, ExportSessionQuery, ExportedSession};
pub use get_session_summary::{GetSessionSummaryHandler, GetSessionSummaryQuery, SessionSummaryView};
pub use list_disagreements::{ListDisagreementsHandler, ListDisagreementsQuery};
pub use preview_routing::{PreviewRoutingHandler, RoutingPreview, RoutingSelection};
pub use record_disagreement::{RecordDisagreementCommand, RecordDisagreementHandler};
pub use route_referral::{RouteReferralCommand, RouteReferralHandler, RouteReferralResult};

use crate::domain::feedback::FeedbackLedger;
use crate::domain::foundation::SessionId;
use crate::ports::TriageSessionRepository;

/// Applies `mutation` to a session's ledger while the repository holds the
/// session exclusively, and returns what the mutation produced.
async fn update_ledger<R, F>(
    repository: &dyn TriageSessionRepository,
    session_id: SessionId,
    mutation: F,
) -> Result<R, TriageError>
where
    R: Send,
    F: FnOnce(&mut FeedbackLedger) -> Result<R, TriageError> + Send,
{
    let mut outcome = None;
    let found = repository
        .update(
            &session_id,
            Box::new(|ledger: &mut FeedbackLedger| outcome = Some(mutation(ledger))),
        )
        .await?;

    match outcome {
        Some(result) if found => result,
        _ => Err(TriageError::SessionNotFound(session_id)),
    }
}

/// Loads a session's ledger or reports the session as missing.
async fn load_ledger(
    repository: &dyn TriageSessionRepository,
    session_id: SessionId,
) -> Result<FeedbackLedger, TriageError> {
    repository
        .find_by_id(&session_id)
        .await?
        .ok_or(TriageError::SessionNotFound(session_id))
}
