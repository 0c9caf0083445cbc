//! Routing domain module.
//!
//! Maps a referral's patient attributes to a clinic destination with a
//! confidence label and an ordered rationale. Everything here is pure and
//! synchronous; session bookkeeping lives in `feedback`.
//!
//! # Components
//!
//! - `catalog` - Clinical indicator vocabulary and its routing categories
//! - `concern` - Primary presenting concern vocabulary
//! - `input` - `RoutingInput` and boundary validation
//! - `router` - The fixed priority cascade
//! - `reasoning` - Rule identifiers and reasoning lines

mod catalog;
mod clinic;
mod concern;
mod decision;
mod input;
mod reasoning;
mod router;

pub use catalog::{join_labels, ClinicalFlag, FlagCategory, FlagGroup};
pub use clinic::{Clinic, Confidence};
pub use concern::PrimaryConcern;
pub use decision::RoutingDecision;
pub use input::{FlagPolicy, RoutingInput};
pub use reasoning::{ReasoningStep, ReasoningTrail, RuleId};
pub use router::{
    ClinicRouter, RouterSettings, EARLY_CHILDHOOD_AGE_LIMIT, INFANT_AGE_LIMIT,
    MIN_CONCURRENT_THERAPIES,
};
