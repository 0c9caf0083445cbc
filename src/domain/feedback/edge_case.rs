//! Free-text edge cases the cascade handles poorly.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EdgeCaseId, Timestamp};

/// A presentation documented by the clinician. Never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeCase {
    pub id: EdgeCaseId,
    pub description: String,
    /// Why the presentation is hard to route.
    pub challenge: String,
    /// What the clinician decided.
    pub decision: String,
    pub recorded_at: Timestamp,
}

impl EdgeCase {
    /// Returns `None` when `description` is blank.
    pub(crate) fn new(description: &str, challenge: &str, decision: &str) -> Option<Self> {
        let description = description.trim();
        if description.is_empty() {
            return None;
        }
        Some(Self {
            id: EdgeCaseId::new(),
            description: description.to_string(),
            challenge: challenge.trim().to_string(),
            decision: decision.trim().to_string(),
            recorded_at: Timestamp::now(),
        })
    }
}
