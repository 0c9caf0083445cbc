//! Routing configuration

use serde::Deserialize;

use crate::domain::routing::{FlagPolicy, RouterSettings, EARLY_CHILDHOOD_AGE_LIMIT};

use super::error::ValidationError;

/// Upper limit accepted for `max_age_years`.
const MAX_AGE_CEILING: f64 = 30.0;

/// Router tuning and input-boundary policy
#[derive(Debug, Clone, Deserialize)]
pub struct RoutingConfig {
    /// How unknown indicator identifiers are treated (`strict` or `lenient`)
    #[serde(default)]
    pub flag_policy: FlagPolicy,

    /// Oldest age, in years, the cascade routes before falling back
    #[serde(default = "default_max_age_years")]
    pub max_age_years: f64,
}

impl RoutingConfig {
    pub fn router_settings(&self) -> RouterSettings {
        RouterSettings {
            max_age_years: self.max_age_years,
        }
    }

    /// The bound must leave the school-age tier reachable.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let age = self.max_age_years;
        if !age.is_finite() || age < EARLY_CHILDHOOD_AGE_LIMIT || age > MAX_AGE_CEILING {
            return Err(ValidationError::InvalidMaxAge {
                min: EARLY_CHILDHOOD_AGE_LIMIT,
                max: MAX_AGE_CEILING,
            });
        }
        Ok(())
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            flag_policy: FlagPolicy::default(),
            max_age_years: default_max_age_years(),
        }
    }
}

fn default_max_age_years() -> f64 {
    RouterSettings::default().max_age_years
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_strict_with_pediatric_bound() {
        let config = RoutingConfig::default();
        assert_eq!(config.flag_policy, FlagPolicy::Strict);
        assert_eq!(config.max_age_years, 21.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn bound_below_school_age_is_rejected() {
        let config = RoutingConfig {
            max_age_years: 5.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn non_finite_bound_is_rejected() {
        let config = RoutingConfig {
            max_age_years: f64::INFINITY,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn router_settings_carry_the_bound() {
        let config = RoutingConfig {
            max_age_years: 18.0,
            ..Default::default()
        };
        assert_eq!(config.router_settings().max_age_years, 18.0);
    }
}
