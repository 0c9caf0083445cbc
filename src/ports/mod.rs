//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `TriageSessionRepository` - Per-session feedback ledger storage

mod triage_session_repository;

pub use triage_session_repository::{LedgerMutation, TriageSessionRepository};
