//! PreviewRoutingHandler - Routes a selection without recording it.

use std::sync::Arc;

use crate::domain::foundation::ValidationError;
use crate::domain::routing::{ClinicRouter, FlagPolicy, RoutingDecision, RoutingInput};

use super::TriageError;

/// Raw selections as a triage screen collects them.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingSelection {
    pub age_years: f64,
    /// Concern identifier or label; unknown text routes through the fallback.
    pub primary_concern: String,
    /// Indicator identifiers or labels.
    pub flags: Vec<String>,
    pub note: Option<String>,
}

impl RoutingSelection {
    /// Validates the selection at the boundary.
    pub fn into_input(self, policy: FlagPolicy) -> Result<RoutingInput, ValidationError> {
        RoutingInput::from_selection(
            self.age_years,
            &self.primary_concern,
            self.flags.as_slice(),
            self.note,
            policy,
        )
    }
}

/// The validated input alongside the router's decision.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingPreview {
    pub input: RoutingInput,
    pub decision: RoutingDecision,
}

/// Handler for stateless routing.
pub struct PreviewRoutingHandler {
    router: Arc<ClinicRouter>,
    flag_policy: FlagPolicy,
}

impl PreviewRoutingHandler {
    pub fn new(router: Arc<ClinicRouter>, flag_policy: FlagPolicy) -> Self {
        Self {
            router,
            flag_policy,
        }
    }

    pub fn handle(&self, selection: RoutingSelection) -> Result<RoutingPreview, TriageError> {
        let input = selection.into_input(self.flag_policy)?;
        let decision = self.router.route(&input);

        tracing::debug!(
            clinic = %decision.clinic,
            confidence = %decision.confidence,
            steps = decision.reasoning.len(),
            "Routing preview computed"
        );

        Ok(RoutingPreview { input, decision })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::routing::{Clinic, Confidence, RuleId};

    fn selection(age: f64, concern: &str, flags: &[&str]) -> RoutingSelection {
        RoutingSelection {
            age_years: age,
            primary_concern: concern.to_string(),
            flags: flags.iter().map(|f| f.to_string()).collect(),
            note: None,
        }
    }

    fn handler(policy: FlagPolicy) -> PreviewRoutingHandler {
        PreviewRoutingHandler::new(Arc::new(ClinicRouter::default()), policy)
    }

    #[test]
    fn routes_labels_from_the_screen() {
        let preview = handler(FlagPolicy::Strict)
            .handle(selection(
                8.0,
                "Isolated Depression (No Developmental Concerns)",
                &[],
            ))
            .unwrap();
        assert_eq!(preview.decision.clinic, Clinic::Ppc);
        assert_eq!(preview.decision.confidence, Confidence::High);
    }

    #[test]
    fn strict_policy_rejects_unknown_flag() {
        let err = handler(FlagPolicy::Strict)
            .handle(selection(8.0, "Autism Spectrum", &["telepathy"]))
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::UnknownValue);
    }

    #[test]
    fn lenient_policy_reports_unknown_flag() {
        let preview = handler(FlagPolicy::Lenient)
            .handle(selection(8.0, "Autism Spectrum", &["telepathy"]))
            .unwrap();
        assert!(preview.decision.fired(RuleId::UnrecognizedIndicators));
    }

    #[test]
    fn negative_age_is_a_validation_error() {
        let err = handler(FlagPolicy::Strict)
            .handle(selection(-2.0, "Autism Spectrum", &[]))
            .unwrap_err();
        assert!(matches!(err, TriageError::Validation(_)));
    }
}
