//! Feedback ledger - append-only record of one triage session.
//!
//! Every routing call is kept as a pending [`RoutingAttempt`]. Clinician
//! judgment finalizes it exactly once into a [`FeedbackRecord`]. Records and
//! edge cases are only ever appended, so insertion order is history order.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::foundation::{AttemptId, EdgeCaseId, Percentage, SessionId, Timestamp};
use crate::domain::routing::{RoutingDecision, RoutingInput};

use super::edge_case::EdgeCase;
use super::errors::LedgerError;
use super::record::{CorrectedDestination, FeedbackRecord, MatchType, RoutingAttempt};
use super::snapshot::SessionSnapshot;

/// Totals over finalized records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub total_tests: usize,
    pub matches: usize,
    pub agreement_rate_percent: Percentage,
}

/// The session ledger. Exclusively owns its attempts, records and edge cases.
#[derive(Debug, Clone)]
pub struct FeedbackLedger {
    session_id: SessionId,
    created_at: Timestamp,
    attempts: Vec<RoutingAttempt>,
    records: Vec<FeedbackRecord>,
    finalized: HashSet<AttemptId>,
    edge_cases: Vec<EdgeCase>,
}

impl FeedbackLedger {
    /// Creates an empty ledger for a new session.
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            created_at: Timestamp::now(),
            attempts: Vec::new(),
            records: Vec::new(),
            finalized: HashSet::new(),
            edge_cases: Vec::new(),
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Every routing attempt in the order it was routed.
    pub fn attempts(&self) -> &[RoutingAttempt] {
        &self.attempts
    }

    /// Attempts still waiting for clinician judgment.
    pub fn pending_attempts(&self) -> Vec<&RoutingAttempt> {
        self.attempts
            .iter()
            .filter(|a| !self.finalized.contains(&a.id))
            .collect()
    }

    /// Finalized records in the order they were finalized.
    pub fn records(&self) -> &[FeedbackRecord] {
        &self.records
    }

    pub fn edge_cases(&self) -> &[EdgeCase] {
        &self.edge_cases
    }

    pub fn attempt(&self, id: AttemptId) -> Option<&RoutingAttempt> {
        self.attempts.iter().find(|a| a.id == id)
    }

    // ───────────────────────────────────────────────────────────────
    // Commands
    // ───────────────────────────────────────────────────────────────

    /// Stores a pending attempt. No clinician judgment yet.
    pub fn record_routing(&mut self, input: RoutingInput, decision: RoutingDecision) -> AttemptId {
        let id = AttemptId::new();
        self.attempts.push(RoutingAttempt {
            id,
            input,
            decision,
            routed_at: Timestamp::now(),
        });
        id
    }

    /// Finalizes an attempt as a Match; the router's clinic is the
    /// corrected destination.
    ///
    /// # Errors
    ///
    /// - `AttemptNotFound` if the id was never recorded in this ledger
    /// - `AlreadyFinalized` if feedback was already recorded
    pub fn confirm_match(&mut self, attempt_id: AttemptId) -> Result<&FeedbackRecord, LedgerError> {
        let attempt = self.pending(attempt_id)?;
        Ok(self.push_record(FeedbackRecord::confirmed(attempt)))
    }

    /// Finalizes an attempt with the clinician's corrected destination.
    ///
    /// # Errors
    ///
    /// - `InvalidMatchType` if `match_type` is `Match`
    /// - `AttemptNotFound` if the id was never recorded in this ledger
    /// - `AlreadyFinalized` if feedback was already recorded
    pub fn record_disagreement(
        &mut self,
        attempt_id: AttemptId,
        corrected_destination: CorrectedDestination,
        corrected_reasoning: Option<String>,
        match_type: MatchType,
    ) -> Result<&FeedbackRecord, LedgerError> {
        if match_type.is_match() {
            return Err(LedgerError::InvalidMatchType);
        }
        let attempt = self.pending(attempt_id)?;
        Ok(self.push_record(FeedbackRecord::corrected(
            attempt,
            match_type,
            corrected_destination,
            corrected_reasoning,
        )))
    }

    /// Appends an edge case. A blank description is a no-op.
    pub fn add_edge_case(
        &mut self,
        description: &str,
        challenge: &str,
        decision: &str,
    ) -> Option<EdgeCaseId> {
        let edge_case = EdgeCase::new(description, challenge, decision)?;
        let id = edge_case.id;
        self.edge_cases.push(edge_case);
        Some(id)
    }

    // ───────────────────────────────────────────────────────────────
    // Queries
    // ───────────────────────────────────────────────────────────────

    /// Matches over finalized records, as a percentage. Zero when empty.
    pub fn agreement_rate(&self) -> Percentage {
        Percentage::from_ratio(self.match_count(), self.records.len())
    }

    /// Non-Match records in insertion order.
    pub fn list_disagreements(&self) -> Vec<&FeedbackRecord> {
        self.records
            .iter()
            .filter(|r| !r.match_type.is_match())
            .collect()
    }

    pub fn summary(&self) -> LedgerSummary {
        LedgerSummary {
            total_tests: self.records.len(),
            matches: self.match_count(),
            agreement_rate_percent: self.agreement_rate(),
        }
    }

    /// Captures every record and edge case with the current summary.
    pub fn export_snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_timestamp: Timestamp::now(),
            routing_tests: self.records.clone(),
            edge_cases: self.edge_cases.clone(),
            summary: self.summary(),
        }
    }

    fn match_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.match_type.is_match())
            .count()
    }

    fn pending(&self, attempt_id: AttemptId) -> Result<RoutingAttempt, LedgerError> {
        if self.finalized.contains(&attempt_id) {
            return Err(LedgerError::AlreadyFinalized(attempt_id));
        }
        self.attempt(attempt_id)
            .cloned()
            .ok_or(LedgerError::AttemptNotFound(attempt_id))
    }

    fn push_record(&mut self, record: FeedbackRecord) -> &FeedbackRecord {
        self.finalized.insert(record.attempt_id);
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }
}
