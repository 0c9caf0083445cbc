//! Routing attempts and the clinician feedback that finalizes them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{AttemptId, Timestamp, ValidationError};
use crate::domain::routing::{Clinic, RoutingDecision, RoutingInput};

/// Clinician's verdict on a routing decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchType {
    Match,
    Disagree,
    Uncertain,
}

impl MatchType {
    pub fn is_match(&self) -> bool {
        matches!(self, MatchType::Match)
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MatchType::Match => "Match",
            MatchType::Disagree => "Disagree",
            MatchType::Uncertain => "Uncertain",
        };
        write!(f, "{}", s)
    }
}

/// Where the clinician would have sent the patient.
///
/// Serialized as a plain string: a clinic code, or one of the two
/// non-clinic dispositions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum CorrectedDestination {
    Clinic(Clinic),
    DualAssessment,
    TriageCall,
}

impl CorrectedDestination {
    const DUAL_ASSESSMENT: &'static str = "Needs dual assessment";
    const TRIAGE_CALL: &'static str = "Needs triage call";

    pub fn label(&self) -> &'static str {
        match self {
            CorrectedDestination::Clinic(clinic) => clinic.code(),
            CorrectedDestination::DualAssessment => Self::DUAL_ASSESSMENT,
            CorrectedDestination::TriageCall => Self::TRIAGE_CALL,
        }
    }

    /// Accepts a clinic code, a disposition label, or its snake_case id.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let value = value.trim();
        if let Some(clinic) = Clinic::from_code(value) {
            return Ok(CorrectedDestination::Clinic(clinic));
        }
        if value.eq_ignore_ascii_case(Self::DUAL_ASSESSMENT) || value == "dual_assessment" {
            return Ok(CorrectedDestination::DualAssessment);
        }
        if value.eq_ignore_ascii_case(Self::TRIAGE_CALL) || value == "triage_call" {
            return Ok(CorrectedDestination::TriageCall);
        }
        Err(ValidationError::unknown_value("corrected_destination", value))
    }

    /// Every selectable destination in display order.
    pub fn all() -> Vec<CorrectedDestination> {
        let mut all: Vec<_> = Clinic::ALL
            .into_iter()
            .map(CorrectedDestination::Clinic)
            .collect();
        all.push(CorrectedDestination::DualAssessment);
        all.push(CorrectedDestination::TriageCall);
        all
    }
}

impl From<Clinic> for CorrectedDestination {
    fn from(clinic: Clinic) -> Self {
        CorrectedDestination::Clinic(clinic)
    }
}

impl From<CorrectedDestination> for String {
    fn from(dest: CorrectedDestination) -> Self {
        dest.label().to_string()
    }
}

impl TryFrom<String> for CorrectedDestination {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CorrectedDestination::parse(&value)
    }
}

impl fmt::Display for CorrectedDestination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A routed referral awaiting clinician judgment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingAttempt {
    pub id: AttemptId,
    pub input: RoutingInput,
    pub decision: RoutingDecision,
    pub routed_at: Timestamp,
}

/// A routing attempt finalized with clinician feedback. Never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub attempt_id: AttemptId,
    pub input: RoutingInput,
    pub decision: RoutingDecision,
    pub match_type: MatchType,
    pub corrected_destination: CorrectedDestination,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corrected_reasoning: Option<String>,
    pub recorded_at: Timestamp,
}

impl FeedbackRecord {
    /// Finalizes an attempt as agreeing with the router.
    pub(crate) fn confirmed(attempt: RoutingAttempt) -> Self {
        let corrected_destination = CorrectedDestination::Clinic(attempt.decision.clinic);
        Self {
            attempt_id: attempt.id,
            input: attempt.input,
            decision: attempt.decision,
            match_type: MatchType::Match,
            corrected_destination,
            corrected_reasoning: None,
            recorded_at: Timestamp::now(),
        }
    }

    /// Finalizes an attempt with the clinician's own destination.
    pub(crate) fn corrected(
        attempt: RoutingAttempt,
        match_type: MatchType,
        corrected_destination: CorrectedDestination,
        corrected_reasoning: Option<String>,
    ) -> Self {
        Self {
            attempt_id: attempt.id,
            input: attempt.input,
            decision: attempt.decision,
            match_type,
            corrected_destination,
            corrected_reasoning: corrected_reasoning
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty()),
            recorded_at: Timestamp::now(),
        }
    }
}
