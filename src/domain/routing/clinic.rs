//! Clinic destinations and routing confidence.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three fixed clinic destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Clinic {
    /// Developmental & Behavioral Pediatrics.
    #[serde(rename = "DBP")]
    Dbp,
    /// Child & Adolescent Neurology.
    #[serde(rename = "CAN")]
    Can,
    /// Pediatric Psychiatry Clinic.
    #[serde(rename = "PPC")]
    Ppc,
}

impl Clinic {
    /// All destinations in display order.
    pub const ALL: [Clinic; 3] = [Clinic::Dbp, Clinic::Can, Clinic::Ppc];

    /// Short code used on referral forms and in exports.
    pub fn code(&self) -> &'static str {
        match self {
            Clinic::Dbp => "DBP",
            Clinic::Can => "CAN",
            Clinic::Ppc => "PPC",
        }
    }

    /// Full clinic name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Clinic::Dbp => "Developmental & Behavioral Pediatrics",
            Clinic::Can => "Child & Adolescent Neurology",
            Clinic::Ppc => "Pediatric Psychiatry Clinic",
        }
    }

    /// One-line summary of the clinic's focus.
    pub fn description(&self) -> &'static str {
        match self {
            Clinic::Dbp => "Autism, ADHD, developmental delays, school and systems complexity",
            Clinic::Can => "Epilepsy, complex neurological conditions, movement disorders",
            Clinic::Ppc => "Mood disorders, anxiety, behavioral health and safety concerns",
        }
    }

    /// Parses a clinic code (`DBP`, `CAN`, `PPC`), case-insensitive.
    pub fn from_code(code: &str) -> Option<Self> {
        Clinic::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(code.trim()))
    }
}

impl fmt::Display for Clinic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Coarse trust label attached to a routing decision.
///
/// Variants are declared from least to most trusted so that `Ord`
/// follows trust: `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            Confidence::Low => "Low",
            Confidence::Medium => "Medium",
            Confidence::High => "High",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
