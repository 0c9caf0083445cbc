//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - Axum REST endpoints
//! - `memory` - In-process session storage

pub mod http;
pub mod memory;

pub use http::{build_app, TriageAppState};
pub use memory::InMemoryTriageSessionRepository;
