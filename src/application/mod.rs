//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;

pub use handlers::triage::{
    // Commands
    AddEdgeCaseCommand, AddEdgeCaseHandler, ConfirmMatchCommand, ConfirmMatchHandler,
    CreateTriageSessionHandler, CreateTriageSessionResult, DeleteSessionCommand,
    DeleteSessionHandler, RecordDisagreementCommand, RecordDisagreementHandler,
    RouteReferralCommand, RouteReferralHandler, RouteReferralResult,
    // Queries
    ExportSessionHandler, ExportSessionQuery, ExportedSession, GetSessionSummaryHandler,
    GetSessionSummaryQuery, ListDisagreementsHandler, ListDisagreementsQuery,
    PreviewRoutingHandler, RoutingPreview, RoutingSelection, SessionSummaryView,
    // Errors
    TriageError,
};
