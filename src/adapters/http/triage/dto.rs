//! HTTP DTOs for triage endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::application::handlers::triage::{
    RouteReferralResult, RoutingPreview, RoutingSelection, SessionSummaryView,
};
use crate::domain::feedback::{CorrectedDestination, FeedbackRecord, MatchType};
use crate::domain::routing::{
    Clinic, ClinicalFlag, Confidence, FlagCategory, PrimaryConcern, ReasoningStep,
    RoutingDecision, RuleId,
};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Patient attributes as selected on the triage screen.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteRequest {
    pub age_years: f64,
    #[serde(default)]
    pub primary_concern: String,
    #[serde(default)]
    pub flags: Vec<String>,
    #[serde(default)]
    pub note: Option<String>,
}

impl From<RouteRequest> for RoutingSelection {
    fn from(req: RouteRequest) -> Self {
        Self {
            age_years: req.age_years,
            primary_concern: req.primary_concern,
            flags: req.flags,
            note: req.note,
        }
    }
}

/// Clinician correction for a routing attempt.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackRequest {
    /// Clinic code or disposition label.
    pub corrected_destination: String,
    #[serde(default)]
    pub corrected_reasoning: Option<String>,
    pub match_type: MatchType,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EdgeCaseRequest {
    pub description: String,
    #[serde(default)]
    pub challenge: String,
    #[serde(default)]
    pub decision: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportParams {
    #[serde(default)]
    pub format: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct DecisionResponse {
    pub clinic: Clinic,
    pub clinic_name: String,
    pub confidence: Confidence,
    pub reasoning: Vec<ReasoningStep>,
}

impl From<RoutingDecision> for DecisionResponse {
    fn from(decision: RoutingDecision) -> Self {
        Self {
            clinic: decision.clinic,
            clinic_name: decision.clinic.display_name().to_string(),
            confidence: decision.confidence,
            reasoning: decision.reasoning,
        }
    }
}

/// Stateless routing result.
#[derive(Debug, Clone, Serialize)]
pub struct RouteResponse {
    pub decision: DecisionResponse,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unrecognized_flags: Vec<String>,
}

impl From<RoutingPreview> for RouteResponse {
    fn from(preview: RoutingPreview) -> Self {
        Self {
            decision: preview.decision.into(),
            unrecognized_flags: preview.input.unrecognized_flags,
        }
    }
}

/// Routing result recorded as a pending attempt.
#[derive(Debug, Clone, Serialize)]
pub struct SessionRouteResponse {
    pub attempt_id: String,
    pub decision: DecisionResponse,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unrecognized_flags: Vec<String>,
}

impl From<RouteReferralResult> for SessionRouteResponse {
    fn from(result: RouteReferralResult) -> Self {
        Self {
            attempt_id: result.attempt_id.to_string(),
            decision: result.decision.into(),
            unrecognized_flags: result.input.unrecognized_flags,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionCreatedResponse {
    pub session_id: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedbackRecordResponse {
    pub attempt_id: String,
    pub match_type: MatchType,
    pub routed_clinic: Clinic,
    pub confidence: Confidence,
    pub corrected_destination: CorrectedDestination,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corrected_reasoning: Option<String>,
    pub recorded_at: String,
}

impl From<FeedbackRecord> for FeedbackRecordResponse {
    fn from(record: FeedbackRecord) -> Self {
        Self {
            attempt_id: record.attempt_id.to_string(),
            match_type: record.match_type,
            routed_clinic: record.decision.clinic,
            confidence: record.decision.confidence,
            corrected_destination: record.corrected_destination,
            corrected_reasoning: record.corrected_reasoning,
            recorded_at: record.recorded_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DisagreementsResponse {
    pub disagreements: Vec<FeedbackRecordResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSummaryResponse {
    pub session_id: String,
    pub created_at: String,
    pub total_tests: usize,
    pub matches: usize,
    pub agreement_rate_percent: f64,
    pub routed: usize,
    pub pending: usize,
    pub disagreements: usize,
    pub edge_cases: usize,
}

impl From<SessionSummaryView> for SessionSummaryResponse {
    fn from(view: SessionSummaryView) -> Self {
        Self {
            session_id: view.session_id.to_string(),
            created_at: view.created_at.to_rfc3339(),
            total_tests: view.summary.total_tests,
            matches: view.summary.matches,
            agreement_rate_percent: view.summary.agreement_rate_percent.value(),
            routed: view.routed,
            pending: view.pending,
            disagreements: view.disagreements,
            edge_cases: view.edge_cases,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EdgeCaseResponse {
    pub recorded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge_case_id: Option<String>,
}

// ── Vocabulary ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ConcernEntry {
    pub id: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct FlagEntry {
    pub id: &'static str,
    pub label: &'static str,
    pub group: &'static str,
    pub categories: Vec<FlagCategory>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClinicEntry {
    pub code: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// Selectable vocabularies for building a triage screen.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogResponse {
    pub clinics: Vec<ClinicEntry>,
    pub concerns: Vec<ConcernEntry>,
    pub flags: Vec<FlagEntry>,
    pub corrected_destinations: Vec<CorrectedDestination>,
}

impl CatalogResponse {
    pub fn build() -> Self {
        Self {
            clinics: Clinic::ALL
                .into_iter()
                .map(|c| ClinicEntry {
                    code: c.code(),
                    name: c.display_name(),
                    description: c.description(),
                })
                .collect(),
            concerns: PrimaryConcern::ALL
                .into_iter()
                .map(|c| ConcernEntry {
                    id: c.id(),
                    label: c.label(),
                })
                .collect(),
            flags: ClinicalFlag::ALL
                .into_iter()
                .map(|f| FlagEntry {
                    id: f.id(),
                    label: f.label(),
                    group: f.group().label(),
                    categories: f.categories().to_vec(),
                })
                .collect(),
            corrected_destinations: CorrectedDestination::all(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RuleEntry {
    pub id: RuleId,
    pub description: &'static str,
}

/// Rules in cascade order.
#[derive(Debug, Clone, Serialize)]
pub struct RulesResponse {
    pub rules: Vec<RuleEntry>,
}

impl RulesResponse {
    pub fn build() -> Self {
        Self {
            rules: RuleId::CASCADE
                .into_iter()
                .map(|id| RuleEntry {
                    id,
                    description: id.description(),
                })
                .collect(),
        }
    }
}

// ── Errors ──────────────────────────────────────────────────────────────────

/// Error body returned by every triage endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn route_request_defaults_optional_fields() {
        let req: RouteRequest = serde_json::from_value(json!({ "age_years": 1.5 })).unwrap();
        assert_eq!(req.primary_concern, "");
        assert!(req.flags.is_empty());
        assert!(req.note.is_none());
    }

    #[test]
    fn catalog_lists_every_vocabulary_entry() {
        let catalog = CatalogResponse::build();
        assert_eq!(catalog.clinics.len(), 3);
        assert_eq!(catalog.concerns.len(), PrimaryConcern::ALL.len());
        assert_eq!(catalog.flags.len(), ClinicalFlag::ALL.len());
        assert!(catalog.flags.iter().all(|f| !f.categories.is_empty()));
    }

    #[test]
    fn rules_follow_cascade_order() {
        let rules = RulesResponse::build();
        assert_eq!(rules.rules[0].id, RuleId::SafetyOverride);
        assert_eq!(rules.rules.len(), RuleId::CASCADE.len());
    }

    #[test]
    fn decision_response_includes_clinic_name() {
        let decision = RoutingDecision::new(
            Clinic::Can,
            Confidence::High,
            crate::domain::routing::ReasoningTrail::new(),
        );
        let json = serde_json::to_value(DecisionResponse::from(decision)).unwrap();
        assert_eq!(json["clinic"], "CAN");
        assert_eq!(json["clinic_name"], "Child & Adolescent Neurology");
    }
}
