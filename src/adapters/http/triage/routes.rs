//! Axum router configuration for triage endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers::{
    add_edge_case, confirm_match, create_session, delete_session, export_session, get_catalog,
    get_rules, get_summary, list_disagreements, preview_route, record_feedback,
    route_in_session, TriageAppState,
};

/// Create the triage API router.
///
/// # Routes
///
/// ## Vocabulary and stateless routing
/// - `GET /catalog` - Concern, indicator and clinic vocabularies
/// - `GET /rules` - Rule identifiers in cascade order
/// - `POST /route` - Route without recording
///
/// ## Sessions
/// - `POST /sessions` - Start a session
/// - `DELETE /sessions/:id` - Discard a session
/// - `POST /sessions/:id/route` - Route and record a pending attempt
/// - `POST /sessions/:id/attempts/:attempt_id/confirm` - Confirm match
/// - `POST /sessions/:id/attempts/:attempt_id/feedback` - Record disagreement
/// - `POST /sessions/:id/edge-cases` - Document an edge case
/// - `GET /sessions/:id/summary` - Totals and agreement rate
/// - `GET /sessions/:id/disagreements` - Non-match records
/// - `GET /sessions/:id/export` - Snapshot download (`?format=json|yaml`)
pub fn triage_routes() -> Router<TriageAppState> {
    Router::new()
        .route("/catalog", get(get_catalog))
        .route("/rules", get(get_rules))
        .route("/route", post(preview_route))
        .route("/sessions", post(create_session))
        .route("/sessions/:id", delete(delete_session))
        .route("/sessions/:id/route", post(route_in_session))
        .route(
            "/sessions/:id/attempts/:attempt_id/confirm",
            post(confirm_match),
        )
        .route(
            "/sessions/:id/attempts/:attempt_id/feedback",
            post(record_feedback),
        )
        .route("/sessions/:id/edge-cases", post(add_edge_case))
        .route("/sessions/:id/summary", get(get_summary))
        .route("/sessions/:id/disagreements", get(list_disagreements))
        .route("/sessions/:id/export", get(export_session))
}

/// Create the triage module router, suitable for mounting at `/api`.
///
/// # Example
///
/// ```ignore
/// let app = Router::new()
///     .nest("/api", triage_router())
///     .with_state(state);
/// ```
pub fn triage_router() -> Router<TriageAppState> {
    Router::new().nest("/triage", triage_routes())
}
