//! Feedback domain module.
//!
//! Session-scoped bookkeeping of routing attempts, clinician feedback and
//! edge cases. The ledger never calls the router; callers route first and
//! hand the decision over.

mod edge_case;
mod errors;
mod ledger;
mod record;
mod snapshot;

pub use edge_case::EdgeCase;
pub use errors::LedgerError;
pub use ledger::{FeedbackLedger, LedgerSummary};
pub use record::{CorrectedDestination, FeedbackRecord, MatchType, RoutingAttempt};
pub use snapshot::{ExportFormat, SessionSnapshot};
