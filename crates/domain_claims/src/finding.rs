//! Findings emitted by the decision pipeline, in evaluation order

use serde::{Deserialize, Serialize};
use std::fmt;

/// The check a finding reports on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Check {
    IcdValid,
    PkgIcdMatch,
    PlanExists,
    Coverage,
    Waiting,
    Preauth,
    Admission,
    Sublimit,
    Copay,
}

impl Check {
    pub fn as_str(&self) -> &'static str {
        match self {
            Check::IcdValid => "icd_valid",
            Check::PkgIcdMatch => "pkg_icd_match",
            Check::PlanExists => "plan_exists",
            Check::Coverage => "coverage",
            Check::Waiting => "waiting",
            Check::Preauth => "preauth",
            Check::Admission => "admission",
            Check::Sublimit => "sublimit",
            Check::Copay => "copay",
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a single check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "PASS")]
    Pass,
    #[serde(rename = "FAIL")]
    Fail,
    #[serde(rename = "REQUIRED")]
    Required,
    #[serde(rename = "APPLIED")]
    Applied,
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Pass => "PASS",
            Outcome::Fail => "FAIL",
            Outcome::Required => "REQUIRED",
            Outcome::Applied => "APPLIED",
            Outcome::NotApplicable => "N/A",
        }
    }

    /// Whether this outcome counts toward the score
    pub fn is_scored(&self) -> bool {
        matches!(self, Outcome::Pass | Outcome::Fail | Outcome::Required)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub check: Check,
    pub outcome: Outcome,
    pub note: Option<String>,
}

impl Finding {
    pub fn new(check: Check, outcome: Outcome) -> Self {
        Self { check, outcome, note: None }
    }

    pub fn with_note(check: Check, outcome: Outcome, note: impl Into<String>) -> Self {
        Self {
            check,
            outcome,
            note: Some(note.into()),
        }
    }

    pub fn pass(check: Check) -> Self {
        Self::new(check, Outcome::Pass)
    }

    pub fn fail(check: Check, note: impl Into<String>) -> Self {
        Self::with_note(check, Outcome::Fail, note)
    }
}
