//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `routing` - Clinic routing cascade over patient attributes
//! - `feedback` - Per-session ledger of clinician feedback and edge cases

pub mod feedback;
pub mod foundation;
pub mod routing;
