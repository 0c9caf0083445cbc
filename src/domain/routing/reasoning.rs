//! Structured routing rationale.
//!
//! Each line of reasoning names the rule that produced it, so callers can
//! assert on rule identity while the message stays free to change.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a rule in the routing cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    SafetyOverride,
    NeurologicScreen,
    DevelopmentalFollowUp,
    UnclearPresentation,
    InfantDevelopmental,
    ScreeningRecommended,
    EarlyChildhoodTier,
    DevelopmentalIndicator,
    EarlyChildhoodPsychiatric,
    DevelopmentalCaution,
    EarlyChildhoodDefault,
    ClinicalNote,
    SeverePsychiatric,
    ComplexPresentation,
    SystemsComplexity,
    GuardrailIsolatedPsychiatric,
    GuardrailNeurologicFollowUp,
    GuardrailMedicationRefill,
    ConcernAutism,
    ConcernAdhd,
    ConcernLearning,
    ConcernDevelopmentalDelay,
    ConcernDiagnosticQuestion,
    NeurodevelopmentalPredominant,
    PsychiatricPredominant,
    ManualTriage,
    UnrecognizedConcern,
    UnrecognizedIndicators,
}

impl RuleId {
    /// Rules in the order the cascade evaluates them.
    pub const CASCADE: [RuleId; 28] = [
        RuleId::SafetyOverride,
        RuleId::NeurologicScreen,
        RuleId::DevelopmentalFollowUp,
        RuleId::UnclearPresentation,
        RuleId::InfantDevelopmental,
        RuleId::ScreeningRecommended,
        RuleId::EarlyChildhoodTier,
        RuleId::DevelopmentalIndicator,
        RuleId::EarlyChildhoodPsychiatric,
        RuleId::DevelopmentalCaution,
        RuleId::EarlyChildhoodDefault,
        RuleId::ClinicalNote,
        RuleId::SeverePsychiatric,
        RuleId::ComplexPresentation,
        RuleId::SystemsComplexity,
        RuleId::GuardrailIsolatedPsychiatric,
        RuleId::GuardrailNeurologicFollowUp,
        RuleId::GuardrailMedicationRefill,
        RuleId::ConcernAutism,
        RuleId::ConcernAdhd,
        RuleId::ConcernLearning,
        RuleId::ConcernDevelopmentalDelay,
        RuleId::ConcernDiagnosticQuestion,
        RuleId::NeurodevelopmentalPredominant,
        RuleId::PsychiatricPredominant,
        RuleId::ManualTriage,
        RuleId::UnrecognizedConcern,
        RuleId::UnrecognizedIndicators,
    ];

    /// One-line summary of what the rule does.
    pub fn description(&self) -> &'static str {
        match self {
            RuleId::SafetyOverride => "Any safety indicator routes to PPC at High confidence, before age",
            RuleId::NeurologicScreen => "Any neurologic indicator routes to CAN",
            RuleId::DevelopmentalFollowUp => {
                "Co-occurring developmental indicators lower confidence to Medium"
            }
            RuleId::UnclearPresentation => {
                "Out-of-domain input defaults to DBP at Low confidence"
            }
            RuleId::InfantDevelopmental => "Under 2 years routes to DBP",
            RuleId::ScreeningRecommended => {
                "Under 2 years with nothing selected routes to DBP at Medium confidence"
            }
            RuleId::EarlyChildhoodTier => "Ages 2-5 use the early childhood developmental lens",
            RuleId::DevelopmentalIndicator => {
                "Ages 2-5 with developmental indicators route to DBP at High confidence"
            }
            RuleId::EarlyChildhoodPsychiatric => {
                "Ages 2-5 with only psychiatric indicators route to PPC at Medium confidence"
            }
            RuleId::DevelopmentalCaution => "Young psychiatric referrals still need a developmental lens",
            RuleId::EarlyChildhoodDefault => "Ages 2-5 default to DBP",
            RuleId::ClinicalNote => "A free-text clinical note counts as a documented concern",
            RuleId::SeverePsychiatric => "Severe psychiatric conditions at 6+ route to PPC",
            RuleId::ComplexPresentation => {
                "Complex or diagnostically uncertain presentations at 6+ route to DBP"
            }
            RuleId::SystemsComplexity => {
                "IEP/504, Regional Center, multiple therapies or school complexity route to DBP"
            }
            RuleId::GuardrailIsolatedPsychiatric => {
                "Isolated depression/anxiety without developmental complexity is barred from DBP"
            }
            RuleId::GuardrailNeurologicFollowUp => {
                "Isolated neurologic follow-up without developmental complexity is barred from DBP"
            }
            RuleId::GuardrailMedicationRefill => "Medication refill only is barred from DBP",
            RuleId::ConcernAutism => "Autism: DBP unless psychiatric symptoms predominate",
            RuleId::ConcernAdhd => "ADHD: DBP only with co-occurring complexity",
            RuleId::ConcernLearning => "Learning disability: DBP, PPC when psychiatric only",
            RuleId::ConcernDevelopmentalDelay => "Developmental delay: DBP",
            RuleId::ConcernDiagnosticQuestion => {
                "Diagnostic question: DBP, PPC when psychiatric only"
            }
            RuleId::NeurodevelopmentalPredominant => {
                "Neurodevelopmental indicators predominate: DBP at Medium confidence"
            }
            RuleId::PsychiatricPredominant => {
                "Psychiatric indicators predominate: PPC at Medium confidence"
            }
            RuleId::ManualTriage => "Nothing applies: DBP at Low confidence, discuss at triage",
            RuleId::UnrecognizedConcern => {
                "An unrecognized presenting concern is reported whenever another rule decided"
            }
            RuleId::UnrecognizedIndicators => "Unrecognized indicators are reported, not used",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Reuse the serde name so logs and exports agree.
        let name = serde_json::to_value(self)
            .ok()
            .and_then(|v| v.as_str().map(str::to_owned))
            .unwrap_or_default();
        write!(f, "{}", name)
    }
}

/// One line of rationale, tagged with the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasoningStep {
    pub rule: RuleId,
    pub message: String,
}

impl ReasoningStep {
    pub fn new(rule: RuleId, message: impl Into<String>) -> Self {
        Self {
            rule,
            message: message.into(),
        }
    }
}

/// Accumulates reasoning in the order rules fire.
#[derive(Debug, Clone, Default)]
pub struct ReasoningTrail {
    steps: Vec<ReasoningStep>,
}

impl ReasoningTrail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rule: RuleId, message: impl Into<String>) {
        self.steps.push(ReasoningStep::new(rule, message));
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn into_steps(self) -> Vec<ReasoningStep> {
        self.steps
    }
}
