//! HTTP handlers for triage endpoints.
//!
//! These handlers connect Axum routes to the triage command and query handlers.

use std::sync::Arc;

use axum::extract::{Json, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::application::handlers::triage::{
    AddEdgeCaseCommand, AddEdgeCaseHandler, ConfirmMatchCommand, ConfirmMatchHandler,
    CreateTriageSessionHandler, DeleteSessionCommand, DeleteSessionHandler,
    ExportSessionHandler, ExportSessionQuery, GetSessionSummaryHandler, GetSessionSummaryQuery,
    ListDisagreementsHandler, ListDisagreementsQuery, PreviewRoutingHandler,
    RecordDisagreementCommand, RecordDisagreementHandler, RouteReferralCommand,
    RouteReferralHandler, TriageError,
};
use crate::domain::feedback::{CorrectedDestination, ExportFormat, LedgerError};
use crate::domain::foundation::{AttemptId, SessionId, ValidationError};
use crate::domain::routing::{ClinicRouter, FlagPolicy};
use crate::ports::TriageSessionRepository;

use super::dto::{
    CatalogResponse, DisagreementsResponse, EdgeCaseRequest, EdgeCaseResponse, ErrorResponse,
    ExportParams, FeedbackRecordResponse, FeedbackRequest, RouteRequest, RouteResponse,
    RulesResponse, SessionCreatedResponse, SessionRouteResponse, SessionSummaryResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for triage endpoints.
///
/// Cloned per request; dependencies are Arc-wrapped.
#[derive(Clone)]
pub struct TriageAppState {
    pub router: Arc<ClinicRouter>,
    pub flag_policy: FlagPolicy,
    pub repository: Arc<dyn TriageSessionRepository>,
}

impl TriageAppState {
    pub fn new(
        router: ClinicRouter,
        flag_policy: FlagPolicy,
        repository: Arc<dyn TriageSessionRepository>,
    ) -> Self {
        Self {
            router: Arc::new(router),
            flag_policy,
            repository,
        }
    }

    pub fn preview_handler(&self) -> PreviewRoutingHandler {
        PreviewRoutingHandler::new(self.router.clone(), self.flag_policy)
    }

    pub fn create_session_handler(&self) -> CreateTriageSessionHandler {
        CreateTriageSessionHandler::new(self.repository.clone())
    }

    pub fn delete_session_handler(&self) -> DeleteSessionHandler {
        DeleteSessionHandler::new(self.repository.clone())
    }

    pub fn route_referral_handler(&self) -> RouteReferralHandler {
        RouteReferralHandler::new(self.router.clone(), self.flag_policy, self.repository.clone())
    }

    pub fn confirm_match_handler(&self) -> ConfirmMatchHandler {
        ConfirmMatchHandler::new(self.repository.clone())
    }

    pub fn record_disagreement_handler(&self) -> RecordDisagreementHandler {
        RecordDisagreementHandler::new(self.repository.clone())
    }

    pub fn add_edge_case_handler(&self) -> AddEdgeCaseHandler {
        AddEdgeCaseHandler::new(self.repository.clone())
    }

    pub fn summary_handler(&self) -> GetSessionSummaryHandler {
        GetSessionSummaryHandler::new(self.repository.clone())
    }

    pub fn disagreements_handler(&self) -> ListDisagreementsHandler {
        ListDisagreementsHandler::new(self.repository.clone())
    }

    pub fn export_handler(&self) -> ExportSessionHandler {
        ExportSessionHandler::new(self.repository.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Vocabulary and stateless routing
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/triage/catalog - Selectable vocabularies
pub async fn get_catalog() -> impl IntoResponse {
    Json(CatalogResponse::build())
}

/// GET /api/triage/rules - Rule identifiers in cascade order
pub async fn get_rules() -> impl IntoResponse {
    Json(RulesResponse::build())
}

/// POST /api/triage/route - Route without recording
pub async fn preview_route(
    State(state): State<TriageAppState>,
    Json(request): Json<RouteRequest>,
) -> Result<impl IntoResponse, TriageApiError> {
    let preview = state.preview_handler().handle(request.into())?;
    Ok(Json(RouteResponse::from(preview)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Session commands
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/triage/sessions - Start a session
pub async fn create_session(
    State(state): State<TriageAppState>,
) -> Result<impl IntoResponse, TriageApiError> {
    let result = state.create_session_handler().handle().await?;
    let response = SessionCreatedResponse {
        session_id: result.session_id.to_string(),
        created_at: result.created_at.to_rfc3339(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// DELETE /api/triage/sessions/:id - Discard a session
pub async fn delete_session(
    State(state): State<TriageAppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, TriageApiError> {
    let cmd = DeleteSessionCommand {
        session_id: parse_session_id(&session_id)?,
    };
    state.delete_session_handler().handle(cmd).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/triage/sessions/:id/route - Route and record a pending attempt
pub async fn route_in_session(
    State(state): State<TriageAppState>,
    Path(session_id): Path<String>,
    Json(request): Json<RouteRequest>,
) -> Result<impl IntoResponse, TriageApiError> {
    let cmd = RouteReferralCommand {
        session_id: parse_session_id(&session_id)?,
        selection: request.into(),
    };
    let result = state.route_referral_handler().handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(SessionRouteResponse::from(result))))
}

/// POST /api/triage/sessions/:id/attempts/:attempt_id/confirm - Confirm match
pub async fn confirm_match(
    State(state): State<TriageAppState>,
    Path((session_id, attempt_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, TriageApiError> {
    let cmd = ConfirmMatchCommand {
        session_id: parse_session_id(&session_id)?,
        attempt_id: parse_attempt_id(&attempt_id)?,
    };
    let record = state.confirm_match_handler().handle(cmd).await?;
    Ok(Json(FeedbackRecordResponse::from(record)))
}

/// POST /api/triage/sessions/:id/attempts/:attempt_id/feedback - Record disagreement
pub async fn record_feedback(
    State(state): State<TriageAppState>,
    Path((session_id, attempt_id)): Path<(String, String)>,
    Json(request): Json<FeedbackRequest>,
) -> Result<impl IntoResponse, TriageApiError> {
    let cmd = RecordDisagreementCommand {
        session_id: parse_session_id(&session_id)?,
        attempt_id: parse_attempt_id(&attempt_id)?,
        corrected_destination: CorrectedDestination::parse(&request.corrected_destination)?,
        corrected_reasoning: request.corrected_reasoning,
        match_type: request.match_type,
    };
    let record = state.record_disagreement_handler().handle(cmd).await?;
    Ok(Json(FeedbackRecordResponse::from(record)))
}

/// POST /api/triage/sessions/:id/edge-cases - Document an edge case
pub async fn add_edge_case(
    State(state): State<TriageAppState>,
    Path(session_id): Path<String>,
    Json(request): Json<EdgeCaseRequest>,
) -> Result<impl IntoResponse, TriageApiError> {
    let cmd = AddEdgeCaseCommand {
        session_id: parse_session_id(&session_id)?,
        description: request.description,
        challenge: request.challenge,
        decision: request.decision,
    };
    let id = state.add_edge_case_handler().handle(cmd).await?;

    let status = if id.is_some() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    let response = EdgeCaseResponse {
        recorded: id.is_some(),
        edge_case_id: id.map(|id| id.to_string()),
    };
    Ok((status, Json(response)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Session queries
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/triage/sessions/:id/summary - Totals and agreement rate
pub async fn get_summary(
    State(state): State<TriageAppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, TriageApiError> {
    let query = GetSessionSummaryQuery {
        session_id: parse_session_id(&session_id)?,
    };
    let view = state.summary_handler().handle(query).await?;
    Ok(Json(SessionSummaryResponse::from(view)))
}

/// GET /api/triage/sessions/:id/disagreements - Non-match records
pub async fn list_disagreements(
    State(state): State<TriageAppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, TriageApiError> {
    let query = ListDisagreementsQuery {
        session_id: parse_session_id(&session_id)?,
    };
    let records = state.disagreements_handler().handle(query).await?;
    let response = DisagreementsResponse {
        disagreements: records.into_iter().map(FeedbackRecordResponse::from).collect(),
    };
    Ok(Json(response))
}

/// GET /api/triage/sessions/:id/export?format=json|yaml - Download snapshot
pub async fn export_session(
    State(state): State<TriageAppState>,
    Path(session_id): Path<String>,
    Query(params): Query<ExportParams>,
) -> Result<Response, TriageApiError> {
    let format = match params.format.as_deref() {
        Some(raw) => raw.parse::<ExportFormat>()?,
        None => ExportFormat::default(),
    };
    let query = ExportSessionQuery {
        session_id: parse_session_id(&session_id)?,
        format,
    };
    let exported = state.export_handler().handle(query).await?;

    let headers = [
        (header::CONTENT_TYPE, exported.content_type.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", exported.file_name),
        ),
    ];
    Ok((headers, exported.body).into_response())
}

// ════════════════════════════════════════════════════════════════════════════════
// Path parsing
// ════════════════════════════════════════════════════════════════════════════════

fn parse_session_id(raw: &str) -> Result<SessionId, TriageApiError> {
    raw.parse()
        .map_err(|_| ValidationError::invalid_format("session_id", "must be a UUID").into())
}

fn parse_attempt_id(raw: &str) -> Result<AttemptId, TriageApiError> {
    raw.parse()
        .map_err(|_| ValidationError::invalid_format("attempt_id", "must be a UUID").into())
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error wrapper that converts triage errors to HTTP responses.
#[derive(Debug)]
pub struct TriageApiError(TriageError);

impl From<TriageError> for TriageApiError {
    fn from(err: TriageError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for TriageApiError {
    fn from(err: ValidationError) -> Self {
        Self(TriageError::Validation(err))
    }
}

impl IntoResponse for TriageApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            TriageError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            TriageError::Validation(_) => StatusCode::BAD_REQUEST,
            TriageError::Ledger(LedgerError::AttemptNotFound(_)) => StatusCode::NOT_FOUND,
            TriageError::Ledger(LedgerError::AlreadyFinalized(_)) => StatusCode::CONFLICT,
            TriageError::Ledger(LedgerError::InvalidMatchType) => StatusCode::BAD_REQUEST,
            TriageError::Ledger(LedgerError::ExportFailed(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            TriageError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "Triage request failed");
        }

        let body = ErrorResponse::new(self.0.code().to_string(), self.0.to_string());
        (status, Json(body)).into_response()
    }
}
