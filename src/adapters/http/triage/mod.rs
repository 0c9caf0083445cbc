//! HTTP adapter for triage endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CatalogResponse, DecisionResponse, DisagreementsResponse, EdgeCaseRequest, EdgeCaseResponse,
    ErrorResponse, FeedbackRecordResponse, FeedbackRequest, RouteRequest, RouteResponse,
    RulesResponse, SessionCreatedResponse, SessionRouteResponse, SessionSummaryResponse,
};
pub use handlers::{TriageApiError, TriageAppState};
pub use routes::{triage_router, triage_routes};
