//! Claim scoring
//!
//! The score is the share of scored checks that passed, minus fixed
//! penalties for cost-sharing: 10 points when a sub-limit capped the claim
//! and 5 points when a co-pay applies.

use crate::finding::{Check, Finding, Outcome};

const SUBLIMIT_PENALTY: f64 = 10.0;
const COPAY_PENALTY: f64 = 5.0;

/// Scores a list of findings on a 0 to 100 scale
pub fn score(findings: &[Finding]) -> f64 {
    let scored = findings.iter().filter(|f| f.outcome.is_scored()).count();
    if scored == 0 {
        return 100.0;
    }

    let passed = findings
        .iter()
        .filter(|f| f.outcome == Outcome::Pass)
        .count();
    let base = round2(100.0 * passed as f64 / scored as f64);

    let mut penalty = 0.0;
    if findings
        .iter()
        .any(|f| f.check == Check::Sublimit && f.outcome == Outcome::Applied)
    {
        penalty += SUBLIMIT_PENALTY;
    }
    if findings.iter().any(|f| f.check == Check::Copay) {
        penalty += COPAY_PENALTY;
    }

    round2(base - penalty).max(0.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
