//! Claim decision returned by the evaluator

use serde::{Deserialize, Serialize};

use core_kernel::Money;
use crate::finding::Finding;

/// Verdict of a claim evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionStatus {
    Denied,
    NeedsPreauth,
    /// Approved in full
    Valid,
    /// Approved, capped by a sub-limit
    Partial,
}

impl DecisionStatus {
    /// Display label shown to claim handlers
    pub fn label(&self) -> &'static str {
        match self {
            DecisionStatus::Denied => "❌ Denied",
            DecisionStatus::NeedsPreauth => "🟡 Needs Pre-Authorization",
            DecisionStatus::Valid => "✅ Valid",
            DecisionStatus::Partial => "⚠️ Partial",
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, DecisionStatus::Valid | DecisionStatus::Partial)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimDecision {
    pub status: DecisionStatus,
    /// 0.0 to 100.0, two decimal places
    pub score: f64,
    pub explanation: String,
    pub findings: Vec<Finding>,
    /// Insurer payout; present only for approved claims
    pub approved_amount: Option<Money>,
    pub next_actions: Vec<String>,
}
