//! Primary presenting concern vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::catalog::ClinicalFlag;

/// The single presenting problem selected for a referral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryConcern {
    AutismSpectrum,
    AdhdStraightforward,
    LearningDisability,
    DevelopmentalDelay,
    DiagnosticQuestion,
    ComplexMultiDomain,
    DiagnosticUncertainty,
    IsolatedDepression,
    IsolatedAnxiety,
    NeurologicFollowUp,
    MedicationRefill,
    BehavioralProblems,
}

impl PrimaryConcern {
    /// Every concern in selection-list order.
    pub const ALL: [PrimaryConcern; 12] = [
        PrimaryConcern::AutismSpectrum,
        PrimaryConcern::AdhdStraightforward,
        PrimaryConcern::LearningDisability,
        PrimaryConcern::DevelopmentalDelay,
        PrimaryConcern::DiagnosticQuestion,
        PrimaryConcern::ComplexMultiDomain,
        PrimaryConcern::DiagnosticUncertainty,
        PrimaryConcern::IsolatedDepression,
        PrimaryConcern::IsolatedAnxiety,
        PrimaryConcern::NeurologicFollowUp,
        PrimaryConcern::MedicationRefill,
        PrimaryConcern::BehavioralProblems,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            PrimaryConcern::AutismSpectrum => "autism_spectrum",
            PrimaryConcern::AdhdStraightforward => "adhd_straightforward",
            PrimaryConcern::LearningDisability => "learning_disability",
            PrimaryConcern::DevelopmentalDelay => "developmental_delay",
            PrimaryConcern::DiagnosticQuestion => "diagnostic_question",
            PrimaryConcern::ComplexMultiDomain => "complex_multi_domain",
            PrimaryConcern::DiagnosticUncertainty => "diagnostic_uncertainty",
            PrimaryConcern::IsolatedDepression => "isolated_depression",
            PrimaryConcern::IsolatedAnxiety => "isolated_anxiety",
            PrimaryConcern::NeurologicFollowUp => "neurologic_follow_up",
            PrimaryConcern::MedicationRefill => "medication_refill",
            PrimaryConcern::BehavioralProblems => "behavioral_problems",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PrimaryConcern::AutismSpectrum => "Autism Spectrum",
            PrimaryConcern::AdhdStraightforward => "ADHD (Straightforward)",
            PrimaryConcern::LearningDisability => "Learning Disability / School Struggles",
            PrimaryConcern::DevelopmentalDelay => "Developmental Delay",
            PrimaryConcern::DiagnosticQuestion => "Diagnostic Question (Autism vs. ADHD vs. Other)",
            PrimaryConcern::ComplexMultiDomain => "Complex Multi-Domain Concerns",
            PrimaryConcern::DiagnosticUncertainty => "Diagnostic Uncertainty",
            PrimaryConcern::IsolatedDepression => "Isolated Depression (No Developmental Concerns)",
            PrimaryConcern::IsolatedAnxiety => "Isolated Anxiety (No Developmental Concerns)",
            PrimaryConcern::NeurologicFollowUp => "Neurologic Follow-up Only",
            PrimaryConcern::MedicationRefill => "Medication Refill Only",
            PrimaryConcern::BehavioralProblems => "Behavioral Problems",
        }
    }

    /// Labels used by earlier revisions of the selection list.
    fn legacy_labels(&self) -> &'static [&'static str] {
        match self {
            PrimaryConcern::AdhdStraightforward => &["ADHD Only"],
            PrimaryConcern::IsolatedDepression => &["Depression/Mood Disorder"],
            PrimaryConcern::IsolatedAnxiety => &["Anxiety Disorder"],
            PrimaryConcern::NeurologicFollowUp => &["Seizures/Epilepsy", "Tics/Movement Disorder"],
            _ => &[],
        }
    }

    /// Resolves an identifier, current label, or legacy label, case-insensitive.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        PrimaryConcern::ALL.into_iter().find(|c| {
            c.id().eq_ignore_ascii_case(value)
                || c.label().eq_ignore_ascii_case(value)
                || c.legacy_labels().iter().any(|l| l.eq_ignore_ascii_case(value))
        })
    }

    /// Concerns that are developmental on their face, even without flags.
    pub fn is_developmental_type(&self) -> bool {
        matches!(
            self,
            PrimaryConcern::AutismSpectrum
                | PrimaryConcern::LearningDisability
                | PrimaryConcern::DevelopmentalDelay
                | PrimaryConcern::DiagnosticQuestion
                | PrimaryConcern::ComplexMultiDomain
                | PrimaryConcern::DiagnosticUncertainty
        )
    }

    /// Concerns that by themselves call for a full developmental workup.
    pub fn is_complex_presentation(&self) -> bool {
        matches!(
            self,
            PrimaryConcern::ComplexMultiDomain | PrimaryConcern::DiagnosticUncertainty
        )
    }

    /// The checklist indicator restating this concern, which does not count
    /// as co-occurring complexity for it.
    pub fn own_indicator(&self) -> Option<ClinicalFlag> {
        match self {
            PrimaryConcern::AutismSpectrum => Some(ClinicalFlag::AutismSpectrum),
            PrimaryConcern::AdhdStraightforward => Some(ClinicalFlag::Adhd),
            PrimaryConcern::LearningDisability => Some(ClinicalFlag::LearningDisability),
            PrimaryConcern::DevelopmentalDelay => Some(ClinicalFlag::DevelopmentalDelay),
            _ => None,
        }
    }
}

impl fmt::Display for PrimaryConcern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
