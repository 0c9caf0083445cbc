//! Clinic router - the fixed routing cascade.
//!
//! Rules are evaluated in priority order and the first match wins:
//!
//! 1. Safety screen (before age)
//! 2. Neurologic screen
//! 3. Age tiers: under 2, 2 to 5, 6 and older
//!
//! The school-age tier runs its own ordered sub-cascade: severe psychiatric
//! screen, complex presentation, systems complexity, guardrails, per-concern
//! rules, and finally indicator predominance.
//!
//! The router is pure: it never logs, stores, or reads anything beyond its
//! input and settings.

use serde::{Deserialize, Serialize};

use super::catalog::{join_labels, ClinicalFlag, FlagCategory};
use super::clinic::{Clinic, Confidence};
use super::concern::PrimaryConcern;
use super::decision::RoutingDecision;
use super::input::RoutingInput;
use super::reasoning::{ReasoningStep, ReasoningTrail, RuleId};

/// Upper bound of the infant tier (exclusive), in years.
pub const INFANT_AGE_LIMIT: f64 = 2.0;

/// Upper bound of the early childhood tier (exclusive), in years.
pub const EARLY_CHILDHOOD_AGE_LIMIT: f64 = 6.0;

/// Concurrent therapies that amount to systems complexity on their own.
pub const MIN_CONCURRENT_THERAPIES: usize = 2;

/// Tunable bounds of the router's input domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouterSettings {
    /// Oldest age, in years, the pediatric cascade accepts.
    pub max_age_years: f64,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            max_age_years: 21.0,
        }
    }
}

/// Deterministic classifier from patient attributes to a clinic.
#[derive(Debug, Clone, Default)]
pub struct ClinicRouter {
    settings: RouterSettings,
}

impl ClinicRouter {
    pub fn new(settings: RouterSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &RouterSettings {
        &self.settings
    }

    /// Routes a referral. Total over its input: every input yields a decision.
    pub fn route(&self, input: &RoutingInput) -> RoutingDecision {
        let profile = FlagProfile::from_flags(input);

        let mut decision = screen_safety(&profile)
            .or_else(|| screen_neurologic(&profile))
            .unwrap_or_else(|| self.route_by_age(input, &profile));

        if let Some(label) = &input.unrecognized_concern {
            let already_named = decision.reasoning.iter().any(|s| {
                s.rule == RuleId::UnclearPresentation && s.message.contains(label.as_str())
            });
            if !already_named {
                decision.reasoning.push(ReasoningStep::new(
                    RuleId::UnrecognizedConcern,
                    format!(
                        "Presenting concern '{}' is not in the concern list and was not used in routing - confirm at triage",
                        label
                    ),
                ));
            }
        }

        if !input.unrecognized_flags.is_empty() {
            decision.reasoning.push(ReasoningStep::new(
                RuleId::UnrecognizedIndicators,
                format!(
                    "Unrecognized indicator(s) not used in routing: {}",
                    input.unrecognized_flags.join(", ")
                ),
            ));
        }

        decision
    }

    fn route_by_age(&self, input: &RoutingInput, profile: &FlagProfile) -> RoutingDecision {
        let age = input.age_years;
        if !age.is_finite() || age < 0.0 || age > self.settings.max_age_years {
            return unclear_presentation(Some(format!(
                "age {} outside supported range 0-{} years",
                age, self.settings.max_age_years
            )));
        }

        if age < INFANT_AGE_LIMIT {
            route_infant(input, profile)
        } else if age < EARLY_CHILDHOOD_AGE_LIMIT {
            route_early_childhood(input, profile)
        } else {
            route_school_age(input, profile)
        }
    }
}

/// Indicators of one input, partitioned by what the cascade asks about.
struct FlagProfile {
    all: Vec<ClinicalFlag>,
    safety: Vec<ClinicalFlag>,
    neuro: Vec<ClinicalFlag>,
    psych: Vec<ClinicalFlag>,
    developmental: Vec<ClinicalFlag>,
    severe_psych: Vec<ClinicalFlag>,
    systems: Vec<ClinicalFlag>,
    therapies: Vec<ClinicalFlag>,
}

impl FlagProfile {
    fn from_flags(input: &RoutingInput) -> Self {
        let all: Vec<ClinicalFlag> = input.flags.iter().copied().collect();
        let pick = |pred: &dyn Fn(&ClinicalFlag) -> bool| -> Vec<ClinicalFlag> {
            all.iter().copied().filter(|f| pred(f)).collect()
        };

        Self {
            safety: pick(&|f| f.is_in(FlagCategory::Safety)),
            neuro: pick(&|f| f.is_in(FlagCategory::Neuro)),
            psych: pick(&|f| f.is_in(FlagCategory::Psych)),
            developmental: pick(&|f| f.is_in(FlagCategory::Developmental)),
            severe_psych: pick(&|f| f.is_severe_psychiatric()),
            systems: pick(&|f| f.is_systems_support()),
            therapies: pick(&|f| f.is_therapy()),
            all,
        }
    }

    /// Developmental indicators other than the one restating `concern`.
    fn complexity_beyond(&self, concern: PrimaryConcern) -> Vec<ClinicalFlag> {
        let own = concern.own_indicator();
        self.developmental
            .iter()
            .copied()
            .filter(|f| Some(*f) != own)
            .collect()
    }

    /// Every factor that makes up systems complexity, for display.
    fn systems_factors(&self) -> Vec<String> {
        let mut factors: Vec<String> = self.systems.iter().map(|f| f.label().to_string()).collect();
        if self.therapies.len() >= MIN_CONCURRENT_THERAPIES {
            factors.push(format!(
                "{} concurrent therapies ({})",
                self.therapies.len(),
                join_labels(&self.therapies)
            ));
        }
        factors
    }
}

fn screen_safety(profile: &FlagProfile) -> Option<RoutingDecision> {
    if profile.safety.is_empty() {
        return None;
    }

    let mut trail = ReasoningTrail::new();
    trail.push(
        RuleId::SafetyOverride,
        format!(
            "Safety concern present ({}) - overrides all other routing, including age",
            join_labels(&profile.safety)
        ),
    );
    trail.push(
        RuleId::SafetyOverride,
        "Route to Pediatric Psychiatry for urgent safety evaluation",
    );
    Some(RoutingDecision::new(Clinic::Ppc, Confidence::High, trail))
}

fn screen_neurologic(profile: &FlagProfile) -> Option<RoutingDecision> {
    if profile.neuro.is_empty() {
        return None;
    }

    let mut trail = ReasoningTrail::new();
    trail.push(
        RuleId::NeurologicScreen,
        format!(
            "Neurologic indicator(s) present ({}) - neurology takes precedence over age-based routing",
            join_labels(&profile.neuro)
        ),
    );

    let confidence = if profile.developmental.is_empty() {
        Confidence::High
    } else {
        trail.push(
            RuleId::DevelopmentalFollowUp,
            format!(
                "Developmental indicator(s) also present ({}) - developmental follow-up may be needed",
                join_labels(&profile.developmental)
            ),
        );
        Confidence::Medium
    };

    Some(RoutingDecision::new(Clinic::Can, confidence, trail))
}

/// Total fallback: DBP at Low confidence with a single reasoning line.
fn unclear_presentation(detail: Option<String>) -> RoutingDecision {
    let message = match detail {
        Some(detail) => format!(
            "Unclear presentation ({}) - defaulting to DBP for initial assessment",
            detail
        ),
        None => "Unclear presentation - defaulting to DBP for initial assessment".to_string(),
    };
    let mut trail = ReasoningTrail::new();
    trail.push(RuleId::UnclearPresentation, message);
    RoutingDecision::new(Clinic::Dbp, Confidence::Low, trail)
}

fn route_infant(input: &RoutingInput, profile: &FlagProfile) -> RoutingDecision {
    let mut trail = ReasoningTrail::new();
    trail.push(
        RuleId::InfantDevelopmental,
        format!(
            "Age {} years (under 2) - early developmental focus",
            input.age_years
        ),
    );

    let confidence = if !profile.developmental.is_empty() || input.has_note() {
        if !profile.developmental.is_empty() {
            trail.push(
                RuleId::InfantDevelopmental,
                format!(
                    "Developmental indicators: {}",
                    join_labels(&profile.developmental)
                ),
            );
        }
        if input.has_note() {
            trail.push(
                RuleId::ClinicalNote,
                "Clinical note documents a concern from the referring clinician",
            );
        }
        Confidence::High
    } else if !profile.all.is_empty() {
        trail.push(
            RuleId::InfantDevelopmental,
            format!(
                "Age alone directs infant referrals to DBP; other indicators ({}) noted for the evaluating team",
                join_labels(&profile.all)
            ),
        );
        Confidence::High
    } else {
        trail.push(
            RuleId::ScreeningRecommended,
            "No indicators selected - developmental screening may be needed",
        );
        Confidence::Medium
    };

    RoutingDecision::new(Clinic::Dbp, confidence, trail)
}

fn route_early_childhood(input: &RoutingInput, profile: &FlagProfile) -> RoutingDecision {
    let mut trail = ReasoningTrail::new();
    trail.push(
        RuleId::EarlyChildhoodTier,
        format!(
            "Age {} years (2-5) - early childhood developmental lens",
            input.age_years
        ),
    );

    let developmental_concern = input
        .primary_concern
        .filter(PrimaryConcern::is_developmental_type);

    if !profile.developmental.is_empty() || developmental_concern.is_some() || input.has_note() {
        for flag in &profile.developmental {
            trail.push(
                RuleId::DevelopmentalIndicator,
                format!("Indicator applies: {}", flag.label()),
            );
        }
        if let Some(concern) = developmental_concern {
            trail.push(
                RuleId::DevelopmentalIndicator,
                format!("Presenting concern: {}", concern.label()),
            );
        }
        if input.has_note() {
            trail.push(
                RuleId::ClinicalNote,
                "Clinical note documents a concern from the referring clinician",
            );
        }
        return RoutingDecision::new(Clinic::Dbp, Confidence::High, trail);
    }

    if !profile.psych.is_empty() {
        trail.push(
            RuleId::EarlyChildhoodPsychiatric,
            format!(
                "Psychiatric indicator(s) without developmental overlap ({})",
                join_labels(&profile.psych)
            ),
        );
        trail.push(
            RuleId::DevelopmentalCaution,
            "Caution: young child - developmental factors should still be considered",
        );
        return RoutingDecision::new(Clinic::Ppc, Confidence::Medium, trail);
    }

    trail.push(
        RuleId::EarlyChildhoodDefault,
        "No specific indicators - early childhood referrals default to DBP",
    );
    RoutingDecision::new(Clinic::Dbp, Confidence::High, trail)
}

fn route_school_age(input: &RoutingInput, profile: &FlagProfile) -> RoutingDecision {
    let concern = input.primary_concern;

    screen_severe_psychiatric(profile)
        .or_else(|| concern.and_then(complex_presentation))
        .or_else(|| systems_complexity(profile))
        .or_else(|| concern.and_then(|c| guardrail(c, profile)))
        .or_else(|| concern.and_then(|c| concern_rule(c, profile)))
        .unwrap_or_else(|| predominance_fallback(input, profile))
}

fn screen_severe_psychiatric(profile: &FlagProfile) -> Option<RoutingDecision> {
    if profile.severe_psych.is_empty() {
        return None;
    }

    let mut trail = ReasoningTrail::new();
    trail.push(
        RuleId::SeverePsychiatric,
        format!(
            "Primary psychiatric condition ({}) - route to Pediatric Psychiatry",
            join_labels(&profile.severe_psych)
        ),
    );

    let confidence = if profile.developmental.is_empty() {
        Confidence::High
    } else {
        trail.push(
            RuleId::DevelopmentalFollowUp,
            format!(
                "Developmental complexity also present ({}) - consider DBP co-management",
                join_labels(&profile.developmental)
            ),
        );
        Confidence::Medium
    };

    Some(RoutingDecision::new(Clinic::Ppc, confidence, trail))
}

fn complex_presentation(concern: PrimaryConcern) -> Option<RoutingDecision> {
    if !concern.is_complex_presentation() {
        return None;
    }

    let mut trail = ReasoningTrail::new();
    trail.push(
        RuleId::ComplexPresentation,
        format!(
            "{} requires a comprehensive developmental evaluation",
            concern.label()
        ),
    );
    Some(RoutingDecision::new(Clinic::Dbp, Confidence::High, trail))
}

fn systems_complexity(profile: &FlagProfile) -> Option<RoutingDecision> {
    let factors = profile.systems_factors();
    if factors.is_empty() {
        return None;
    }

    let mut trail = ReasoningTrail::new();
    trail.push(
        RuleId::SystemsComplexity,
        "Developmental/systems complexity present - DBP coordinates care across systems",
    );
    for factor in factors {
        trail.push(RuleId::SystemsComplexity, format!("Contributing factor: {}", factor));
    }
    Some(RoutingDecision::new(Clinic::Dbp, Confidence::High, trail))
}

fn guardrail(concern: PrimaryConcern, profile: &FlagProfile) -> Option<RoutingDecision> {
    let no_complexity = profile.developmental.is_empty();
    let mut trail = ReasoningTrail::new();

    let clinic = match concern {
        PrimaryConcern::IsolatedDepression | PrimaryConcern::IsolatedAnxiety if no_complexity => {
            trail.push(
                RuleId::GuardrailIsolatedPsychiatric,
                format!(
                    "{} without developmental complexity does not meet DBP criteria",
                    concern.label()
                ),
            );
            trail.push(
                RuleId::GuardrailIsolatedPsychiatric,
                "Route to Pediatric Psychiatry",
            );
            Clinic::Ppc
        }
        PrimaryConcern::NeurologicFollowUp if no_complexity => {
            trail.push(
                RuleId::GuardrailNeurologicFollowUp,
                "Isolated neurologic follow-up without developmental complexity does not meet DBP criteria",
            );
            trail.push(
                RuleId::GuardrailNeurologicFollowUp,
                "Route to Child & Adolescent Neurology",
            );
            Clinic::Can
        }
        PrimaryConcern::MedicationRefill => {
            trail.push(
                RuleId::GuardrailMedicationRefill,
                "Medication refill only does not meet DBP criteria",
            );
            trail.push(
                RuleId::GuardrailMedicationRefill,
                "Route to Pediatric Psychiatry for medication management",
            );
            Clinic::Ppc
        }
        _ => return None,
    };

    Some(RoutingDecision::new(clinic, Confidence::High, trail))
}

fn concern_rule(concern: PrimaryConcern, profile: &FlagProfile) -> Option<RoutingDecision> {
    let complexity = profile.complexity_beyond(concern);
    let has_psych = !profile.psych.is_empty();
    let mut trail = ReasoningTrail::new();

    let (rule, clinic, confidence) = match concern {
        PrimaryConcern::AutismSpectrum => {
            let rule = RuleId::ConcernAutism;
            if !complexity.is_empty() {
                trail.push(rule, format!(
                    "Autism with co-occurring school/learning complexity ({}) - DBP for comprehensive management",
                    join_labels(&complexity)
                ));
                (rule, Clinic::Dbp, Confidence::High)
            } else if has_psych {
                trail.push(rule, format!(
                    "Autism with psychiatric symptoms ({}) and no school/learning complexity - psychiatric care first",
                    join_labels(&profile.psych)
                ));
                trail.push(rule, "DBP may co-manage autism-specific needs");
                (rule, Clinic::Ppc, Confidence::Medium)
            } else {
                trail.push(rule, "Autism spectrum concerns route to DBP");
                (rule, Clinic::Dbp, Confidence::High)
            }
        }
        PrimaryConcern::AdhdStraightforward => {
            let rule = RuleId::ConcernAdhd;
            if !complexity.is_empty() {
                trail.push(rule, format!(
                    "Complexity indicator(s) present ({}) - overrides the straightforward ADHD label",
                    join_labels(&complexity)
                ));
                (rule, Clinic::Dbp, Confidence::High)
            } else {
                trail.push(
                    rule,
                    "Straightforward ADHD without developmental complexity does not meet DBP criteria",
                );
                trail.push(rule, "Route to Pediatric Psychiatry for ADHD management");
                (rule, Clinic::Ppc, Confidence::High)
            }
        }
        PrimaryConcern::LearningDisability => {
            let rule = RuleId::ConcernLearning;
            if !complexity.is_empty() {
                trail.push(rule, format!(
                    "Learning concern with co-occurring developmental factors ({}) - DBP evaluation",
                    join_labels(&complexity)
                ));
                (rule, Clinic::Dbp, Confidence::High)
            } else if has_psych {
                trail.push(rule, format!(
                    "Learning concern alongside psychiatric symptoms ({}) without documented supports",
                    join_labels(&profile.psych)
                ));
                trail.push(rule, "Psychiatric evaluation first; revisit DBP if school concerns persist");
                (rule, Clinic::Ppc, Confidence::Medium)
            } else {
                trail.push(
                    rule,
                    "Learning concern without documented supports - DBP evaluation, confirm school history",
                );
                (rule, Clinic::Dbp, Confidence::Medium)
            }
        }
        PrimaryConcern::DevelopmentalDelay => {
            let rule = RuleId::ConcernDevelopmentalDelay;
            if !complexity.is_empty() {
                trail.push(rule, format!(
                    "Developmental delay with co-occurring factors ({}) - DBP",
                    join_labels(&complexity)
                ));
                (rule, Clinic::Dbp, Confidence::High)
            } else {
                trail.push(
                    rule,
                    "Developmental delay reported at school age without supporting indicators - DBP",
                );
                (rule, Clinic::Dbp, Confidence::Medium)
            }
        }
        PrimaryConcern::DiagnosticQuestion => {
            let rule = RuleId::ConcernDiagnosticQuestion;
            if !complexity.is_empty() {
                trail.push(rule, format!(
                    "Diagnostic question with developmental factors ({}) - DBP diagnostic evaluation",
                    join_labels(&complexity)
                ));
                (rule, Clinic::Dbp, Confidence::High)
            } else if has_psych {
                trail.push(rule, format!(
                    "Diagnostic question with psychiatric symptoms only ({})",
                    join_labels(&profile.psych)
                ));
                (rule, Clinic::Ppc, Confidence::Medium)
            } else {
                trail.push(
                    rule,
                    "Diagnostic question without supporting indicators - DBP diagnostic evaluation",
                );
                (rule, Clinic::Dbp, Confidence::Medium)
            }
        }
        _ => return None,
    };

    debug_assert!(!trail.is_empty(), "{} fired without reasoning", rule);
    Some(RoutingDecision::new(clinic, confidence, trail))
}

fn predominance_fallback(input: &RoutingInput, profile: &FlagProfile) -> RoutingDecision {
    let developmental = profile.developmental.len();
    let psych = profile.psych.len();
    let mut trail = ReasoningTrail::new();

    if developmental > psych {
        trail.push(
            RuleId::NeurodevelopmentalPredominant,
            format!(
                "Neurodevelopmental indicators predominate ({}) - prefer DBP",
                join_labels(&profile.developmental)
            ),
        );
        return RoutingDecision::new(Clinic::Dbp, Confidence::Medium, trail);
    }

    if psych > developmental {
        trail.push(
            RuleId::PsychiatricPredominant,
            format!(
                "Psychiatric indicators predominate ({}) - prefer Pediatric Psychiatry",
                join_labels(&profile.psych)
            ),
        );
        return RoutingDecision::new(Clinic::Ppc, Confidence::Medium, trail);
    }

    match input.primary_concern {
        Some(concern) => {
            trail.push(
                RuleId::ManualTriage,
                format!(
                    "No routing rule clearly applies to {} - defaulting to DBP",
                    concern.label()
                ),
            );
            trail.push(
                RuleId::ManualTriage,
                "Recommend manual clinical triage discussion",
            );
            RoutingDecision::new(Clinic::Dbp, Confidence::Low, trail)
        }
        None => unclear_presentation(Some(match &input.unrecognized_concern {
            Some(label) => format!("unrecognized concern '{}'", label),
            None => "no presenting concern selected".to_string(),
        })),
    }
}
