//! Routing decision value object.

use serde::{Deserialize, Serialize};

use super::clinic::{Clinic, Confidence};
use super::reasoning::{ReasoningStep, ReasoningTrail, RuleId};

/// Clinic, confidence, and the ordered rationale behind them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingDecision {
    pub clinic: Clinic,
    pub confidence: Confidence,
    pub reasoning: Vec<ReasoningStep>,
}

impl RoutingDecision {
    pub fn new(clinic: Clinic, confidence: Confidence, trail: ReasoningTrail) -> Self {
        Self {
            clinic,
            confidence,
            reasoning: trail.into_steps(),
        }
    }

    /// Reasoning messages in display order.
    pub fn messages(&self) -> Vec<&str> {
        self.reasoning.iter().map(|s| s.message.as_str()).collect()
    }

    /// Rules that contributed, in firing order (may repeat).
    pub fn rules(&self) -> Vec<RuleId> {
        self.reasoning.iter().map(|s| s.rule).collect()
    }

    /// Returns true if `rule` produced at least one reasoning line.
    pub fn fired(&self, rule: RuleId) -> bool {
        self.reasoning.iter().any(|s| s.rule == rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_exposes_messages_and_rules_in_order() {
        let mut trail = ReasoningTrail::new();
        trail.push(RuleId::NeurologicScreen, "neuro");
        trail.push(RuleId::DevelopmentalFollowUp, "follow up");
        let decision = RoutingDecision::new(Clinic::Can, Confidence::Medium, trail);

        assert_eq!(decision.messages(), vec!["neuro", "follow up"]);
        assert_eq!(
            decision.rules(),
            vec![RuleId::NeurologicScreen, RuleId::DevelopmentalFollowUp]
        );
        assert!(decision.fired(RuleId::DevelopmentalFollowUp));
        assert!(!decision.fired(RuleId::SafetyOverride));
    }

    #[test]
    fn decision_serializes_reasoning_as_rule_message_pairs() {
        let mut trail = ReasoningTrail::new();
        trail.push(RuleId::ManualTriage, "discuss");
        let decision = RoutingDecision::new(Clinic::Dbp, Confidence::Low, trail);

        let json = serde_json::to_value(&decision).unwrap();
        assert_eq!(json["clinic"], "DBP");
        assert_eq!(json["confidence"], "Low");
        assert_eq!(json["reasoning"][0]["rule"], "manual_triage");
        assert_eq!(json["reasoning"][0]["message"], "discuss");
    }
}
