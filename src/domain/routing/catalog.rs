//! Clinical indicator catalog.
//!
//! Every selectable indicator is a [`ClinicalFlag`] variant. Its display group
//! and routing categories come from exhaustive matches, so an indicator
//! cannot exist without a category mapping.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Routing category an indicator contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagCategory {
    Safety,
    Neuro,
    Psych,
    Developmental,
}

/// Display grouping of the checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagGroup {
    Safety,
    NeurologicHistory,
    GeneticNeurocutaneous,
    MentalHealthHistory,
    DevelopmentalSupports,
    CurrentTherapies,
}

impl FlagGroup {
    pub fn label(&self) -> &'static str {
        match self {
            FlagGroup::Safety => "Safety",
            FlagGroup::NeurologicHistory => "Neurologic History",
            FlagGroup::GeneticNeurocutaneous => "Genetic / Neurocutaneous",
            FlagGroup::MentalHealthHistory => "Mental Health History",
            FlagGroup::DevelopmentalSupports => "Developmental / Educational Supports",
            FlagGroup::CurrentTherapies => "Current Therapies",
        }
    }
}

/// A single boolean clinical fact selectable on the intake checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClinicalFlag {
    // Safety
    SuicidalIdeation,
    SuicideAttempt,
    AcuteCrisis,

    // Neurologic history
    Seizures,
    SeriousHeadInjury,
    CerebralPalsy,
    FrequentHeadaches,

    // Genetic / neurocutaneous
    TuberousSclerosis,
    AbnormalGeneticTesting,

    // Mental health history
    Bipolar,
    ModerateSevereOcd,
    MajorDepression,
    SevereAnxiety,
    PsychiatricHospitalization,
    MoodAnxietyMedication,
    Adhd,

    // Developmental / educational supports
    AutismSpectrum,
    DevelopmentalDelay,
    LearningDisability,
    Iep,
    #[serde(rename = "section_504")]
    Section504,
    RegionalCenter,
    SchoolDifficulties,

    // Current therapies
    SpeechTherapy,
    OccupationalTherapy,
    BehavioralTherapy,
    PhysicalTherapy,
}

impl ClinicalFlag {
    /// Every indicator in checklist order.
    pub const ALL: [ClinicalFlag; 27] = [
        ClinicalFlag::SuicidalIdeation,
        ClinicalFlag::SuicideAttempt,
        ClinicalFlag::AcuteCrisis,
        ClinicalFlag::Seizures,
        ClinicalFlag::SeriousHeadInjury,
        ClinicalFlag::CerebralPalsy,
        ClinicalFlag::FrequentHeadaches,
        ClinicalFlag::TuberousSclerosis,
        ClinicalFlag::AbnormalGeneticTesting,
        ClinicalFlag::Bipolar,
        ClinicalFlag::ModerateSevereOcd,
        ClinicalFlag::MajorDepression,
        ClinicalFlag::SevereAnxiety,
        ClinicalFlag::PsychiatricHospitalization,
        ClinicalFlag::MoodAnxietyMedication,
        ClinicalFlag::Adhd,
        ClinicalFlag::AutismSpectrum,
        ClinicalFlag::DevelopmentalDelay,
        ClinicalFlag::LearningDisability,
        ClinicalFlag::Iep,
        ClinicalFlag::Section504,
        ClinicalFlag::RegionalCenter,
        ClinicalFlag::SchoolDifficulties,
        ClinicalFlag::SpeechTherapy,
        ClinicalFlag::OccupationalTherapy,
        ClinicalFlag::BehavioralTherapy,
        ClinicalFlag::PhysicalTherapy,
    ];

    /// Stable machine identifier (matches the serde representation).
    pub fn id(&self) -> &'static str {
        match self {
            ClinicalFlag::SuicidalIdeation => "suicidal_ideation",
            ClinicalFlag::SuicideAttempt => "suicide_attempt",
            ClinicalFlag::AcuteCrisis => "acute_crisis",
            ClinicalFlag::Seizures => "seizures",
            ClinicalFlag::SeriousHeadInjury => "serious_head_injury",
            ClinicalFlag::CerebralPalsy => "cerebral_palsy",
            ClinicalFlag::FrequentHeadaches => "frequent_headaches",
            ClinicalFlag::TuberousSclerosis => "tuberous_sclerosis",
            ClinicalFlag::AbnormalGeneticTesting => "abnormal_genetic_testing",
            ClinicalFlag::Bipolar => "bipolar",
            ClinicalFlag::ModerateSevereOcd => "moderate_severe_ocd",
            ClinicalFlag::MajorDepression => "major_depression",
            ClinicalFlag::SevereAnxiety => "severe_anxiety",
            ClinicalFlag::PsychiatricHospitalization => "psychiatric_hospitalization",
            ClinicalFlag::MoodAnxietyMedication => "mood_anxiety_medication",
            ClinicalFlag::Adhd => "adhd",
            ClinicalFlag::AutismSpectrum => "autism_spectrum",
            ClinicalFlag::DevelopmentalDelay => "developmental_delay",
            ClinicalFlag::LearningDisability => "learning_disability",
            ClinicalFlag::Iep => "iep",
            ClinicalFlag::Section504 => "section_504",
            ClinicalFlag::RegionalCenter => "regional_center",
            ClinicalFlag::SchoolDifficulties => "school_difficulties",
            ClinicalFlag::SpeechTherapy => "speech_therapy",
            ClinicalFlag::OccupationalTherapy => "occupational_therapy",
            ClinicalFlag::BehavioralTherapy => "behavioral_therapy",
            ClinicalFlag::PhysicalTherapy => "physical_therapy",
        }
    }

    /// Checklist label.
    pub fn label(&self) -> &'static str {
        match self {
            ClinicalFlag::SuicidalIdeation => "Suicidal Ideation",
            ClinicalFlag::SuicideAttempt => "Suicide Attempt",
            ClinicalFlag::AcuteCrisis => "Acute Behavioral Crisis",
            ClinicalFlag::Seizures => "Seizures/Epilepsy",
            ClinicalFlag::SeriousHeadInjury => "Serious Head Injury",
            ClinicalFlag::CerebralPalsy => "Cerebral Palsy",
            ClinicalFlag::FrequentHeadaches => "Frequent Headaches",
            ClinicalFlag::TuberousSclerosis => "Tuberous Sclerosis",
            ClinicalFlag::AbnormalGeneticTesting => "Abnormal Genetic Testing",
            ClinicalFlag::Bipolar => "Bipolar Disorder",
            ClinicalFlag::ModerateSevereOcd => "OCD (Moderate-Severe)",
            ClinicalFlag::MajorDepression => "Major Depression",
            ClinicalFlag::SevereAnxiety => "Severe Anxiety",
            ClinicalFlag::PsychiatricHospitalization => "Psychiatric Hospitalization History",
            ClinicalFlag::MoodAnxietyMedication => "Mood/Anxiety Requiring Medication",
            ClinicalFlag::Adhd => "ADHD",
            ClinicalFlag::AutismSpectrum => "Autism Spectrum",
            ClinicalFlag::DevelopmentalDelay => "Developmental Delay",
            ClinicalFlag::LearningDisability => "Learning Disability",
            ClinicalFlag::Iep => "IEP",
            ClinicalFlag::Section504 => "504 Plan",
            ClinicalFlag::RegionalCenter => "Regional Center Services",
            ClinicalFlag::SchoolDifficulties => "School System Complexity",
            ClinicalFlag::SpeechTherapy => "Speech Therapy",
            ClinicalFlag::OccupationalTherapy => "Occupational Therapy",
            ClinicalFlag::BehavioralTherapy => "Behavioral Therapy (ABA)",
            ClinicalFlag::PhysicalTherapy => "Physical Therapy",
        }
    }

    /// Checklist group the indicator is displayed under.
    pub fn group(&self) -> FlagGroup {
        use ClinicalFlag::*;
        match self {
            SuicidalIdeation | SuicideAttempt | AcuteCrisis => FlagGroup::Safety,
            Seizures | SeriousHeadInjury | CerebralPalsy | FrequentHeadaches => {
                FlagGroup::NeurologicHistory
            }
            TuberousSclerosis | AbnormalGeneticTesting => FlagGroup::GeneticNeurocutaneous,
            Bipolar | ModerateSevereOcd | MajorDepression | SevereAnxiety
            | PsychiatricHospitalization | MoodAnxietyMedication | Adhd => {
                FlagGroup::MentalHealthHistory
            }
            AutismSpectrum | DevelopmentalDelay | LearningDisability | Iep | Section504
            | RegionalCenter | SchoolDifficulties => FlagGroup::DevelopmentalSupports,
            SpeechTherapy | OccupationalTherapy | BehavioralTherapy | PhysicalTherapy => {
                FlagGroup::CurrentTherapies
            }
        }
    }

    /// Routing categories. Never empty.
    pub fn categories(&self) -> &'static [FlagCategory] {
        use ClinicalFlag::*;
        use FlagCategory as C;
        match self {
            SuicidalIdeation | SuicideAttempt => &[C::Safety, C::Psych],
            AcuteCrisis => &[C::Safety],
            Seizures | SeriousHeadInjury | CerebralPalsy | FrequentHeadaches
            | TuberousSclerosis | AbnormalGeneticTesting => &[C::Neuro],
            Bipolar | ModerateSevereOcd | MajorDepression | SevereAnxiety
            | PsychiatricHospitalization | MoodAnxietyMedication => &[C::Psych],
            Adhd => &[C::Psych, C::Developmental],
            AutismSpectrum | DevelopmentalDelay | LearningDisability | Iep | Section504
            | RegionalCenter | SchoolDifficulties | SpeechTherapy | OccupationalTherapy
            | BehavioralTherapy | PhysicalTherapy => &[C::Developmental],
        }
    }

    /// Returns true if the indicator belongs to `category`.
    pub fn is_in(&self, category: FlagCategory) -> bool {
        self.categories().contains(&category)
    }

    /// Named severe psychiatric conditions screened first at school age.
    pub fn is_severe_psychiatric(&self) -> bool {
        matches!(
            self,
            ClinicalFlag::Bipolar
                | ClinicalFlag::ModerateSevereOcd
                | ClinicalFlag::MajorDepression
                | ClinicalFlag::SevereAnxiety
                | ClinicalFlag::PsychiatricHospitalization
        )
    }

    /// School and service-system indicators that mark systems complexity.
    pub fn is_systems_support(&self) -> bool {
        matches!(
            self,
            ClinicalFlag::Iep
                | ClinicalFlag::Section504
                | ClinicalFlag::RegionalCenter
                | ClinicalFlag::SchoolDifficulties
        )
    }

    /// Returns true for an ongoing therapy service.
    pub fn is_therapy(&self) -> bool {
        self.group() == FlagGroup::CurrentTherapies
    }

    /// Resolves an identifier or checklist label, case-insensitive.
    pub fn parse(value: &str) -> Option<Self> {
        FLAG_LOOKUP.get(&value.trim().to_lowercase()).copied()
    }
}

impl fmt::Display for ClinicalFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

static FLAG_LOOKUP: Lazy<HashMap<String, ClinicalFlag>> = Lazy::new(|| {
    let mut lookup = HashMap::with_capacity(ClinicalFlag::ALL.len() * 2);
    for flag in ClinicalFlag::ALL {
        lookup.insert(flag.id().to_string(), flag);
        lookup.insert(flag.label().to_lowercase(), flag);
    }
    lookup
});

/// Joins indicator labels for reasoning text, in set order.
pub fn join_labels<'a>(flags: impl IntoIterator<Item = &'a ClinicalFlag>) -> String {
    flags
        .into_iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_flag_has_at_least_one_category() {
        for flag in ClinicalFlag::ALL {
            assert!(!flag.categories().is_empty(), "{:?} has no category", flag);
        }
    }

    #[test]
    fn all_lists_each_flag_once() {
        let unique: HashSet<_> = ClinicalFlag::ALL.iter().collect();
        assert_eq!(unique.len(), ClinicalFlag::ALL.len());
    }

    #[test]
    fn id_matches_serde_representation() {
        for flag in ClinicalFlag::ALL {
            let json = serde_json::to_string(&flag).unwrap();
            assert_eq!(json, format!("\"{}\"", flag.id()));
        }
    }

    #[test]
    fn parse_accepts_id_and_label() {
        assert_eq!(ClinicalFlag::parse("iep"), Some(ClinicalFlag::Iep));
        assert_eq!(ClinicalFlag::parse("Autism Spectrum"), Some(ClinicalFlag::AutismSpectrum));
        assert_eq!(ClinicalFlag::parse("  504 plan "), Some(ClinicalFlag::Section504));
        assert_eq!(ClinicalFlag::parse("telepathy"), None);
    }

    #[test]
    fn safety_flags_are_grouped_under_safety() {
        for flag in ClinicalFlag::ALL.iter().filter(|f| f.is_in(FlagCategory::Safety)) {
            assert_eq!(flag.group(), FlagGroup::Safety);
        }
    }

    #[test]
    fn severe_psychiatric_flags_are_psych_category() {
        for flag in ClinicalFlag::ALL.iter().filter(|f| f.is_severe_psychiatric()) {
            assert!(flag.is_in(FlagCategory::Psych));
        }
    }

    #[test]
    fn therapies_are_developmental() {
        for flag in ClinicalFlag::ALL.iter().filter(|f| f.is_therapy()) {
            assert!(flag.is_in(FlagCategory::Developmental));
        }
    }

    #[test]
    fn join_labels_uses_checklist_labels() {
        let flags = [ClinicalFlag::Iep, ClinicalFlag::RegionalCenter];
        assert_eq!(join_labels(&flags), "IEP, Regional Center Services");
    }
}
