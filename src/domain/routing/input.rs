//! Routing input and its validation boundary.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::foundation::ValidationError;

use super::catalog::ClinicalFlag;
use super::concern::PrimaryConcern;

/// How the input boundary treats indicator identifiers it cannot resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagPolicy {
    /// Reject the request with a validation error.
    #[default]
    Strict,
    /// Accept the request and report the identifiers in the reasoning.
    Lenient,
}

/// Patient attributes the router decides on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingInput {
    /// Age in years; fractional below two years.
    pub age_years: f64,

    /// `None` when the supplied concern is outside the vocabulary.
    pub primary_concern: Option<PrimaryConcern>,

    /// The raw concern text when it could not be resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unrecognized_concern: Option<String>,

    /// Selected indicators, kept in catalog order.
    #[serde(default)]
    pub flags: BTreeSet<ClinicalFlag>,

    /// Free-text clinical note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// Indicator identifiers accepted under [`FlagPolicy::Lenient`] but not
    /// present in the catalog.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unrecognized_flags: Vec<String>,
}

impl RoutingInput {
    /// Creates an input with no flags and no note.
    pub fn new(age_years: f64, primary_concern: Option<PrimaryConcern>) -> Self {
        Self {
            age_years,
            primary_concern,
            unrecognized_concern: None,
            flags: BTreeSet::new(),
            note: None,
            unrecognized_flags: Vec::new(),
        }
    }

    pub fn with_flags(mut self, flags: impl IntoIterator<Item = ClinicalFlag>) -> Self {
        self.flags.extend(flags);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Builds an input from free-form selections at the boundary.
    ///
    /// The concern never fails to parse; an unknown label is kept for the
    /// reasoning and routed through the fallback rules. Unknown indicator
    /// identifiers are rejected or carried according to `policy`.
    ///
    /// # Errors
    ///
    /// - `UnknownValue` for an unresolved indicator under `FlagPolicy::Strict`
    /// - `InvalidFormat` for a negative or non-finite age
    pub fn from_selection<S: AsRef<str>>(
        age_years: f64,
        concern: &str,
        flags: &[S],
        note: Option<String>,
        policy: FlagPolicy,
    ) -> Result<Self, ValidationError> {
        if !age_years.is_finite() || age_years < 0.0 {
            return Err(ValidationError::invalid_format(
                "age_years",
                "must be a non-negative number of years",
            ));
        }

        let primary_concern = PrimaryConcern::parse(concern);
        let unrecognized_concern = match primary_concern {
            Some(_) => None,
            None if concern.trim().is_empty() => None,
            None => Some(concern.trim().to_string()),
        };

        let mut selected = BTreeSet::new();
        let mut unrecognized_flags = Vec::new();
        for raw in flags {
            let raw = raw.as_ref();
            match ClinicalFlag::parse(raw) {
                Some(flag) => {
                    selected.insert(flag);
                }
                None if policy == FlagPolicy::Strict => {
                    return Err(ValidationError::unknown_value("flags", raw));
                }
                None => unrecognized_flags.push(raw.trim().to_string()),
            }
        }

        Ok(Self {
            age_years,
            primary_concern,
            unrecognized_concern,
            flags: selected,
            note,
            unrecognized_flags,
        })
    }

    /// True when the note carries any non-whitespace text.
    pub fn has_note(&self) -> bool {
        self.note.as_deref().map_or(false, |n| !n.trim().is_empty())
    }
}
