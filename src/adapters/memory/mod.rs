//! In-memory adapters.

mod triage_session_repository;

pub use triage_session_repository::InMemoryTriageSessionRepository;
