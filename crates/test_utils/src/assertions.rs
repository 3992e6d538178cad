//! Custom Test Assertions
//!
//! Assertion helpers for claim decisions and money that give more meaningful
//! failure messages than plain `assert_eq!`.

use rust_decimal::Decimal;
use serde_json::Value;

use core_kernel::Money;
use domain_claims::{Check, ClaimDecision, DecisionStatus, Outcome};

/// Asserts that two Money values are approximately equal within a tolerance
///
/// # Panics
///
/// Panics if the currencies don't match or the amounts differ by more than tolerance
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );

    let diff = (actual.amount() - expected.amount()).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual.amount(),
        expected.amount(),
        diff,
        tolerance
    );
}

pub fn assert_status(decision: &ClaimDecision, expected: DecisionStatus) {
    assert_eq!(
        decision.status, expected,
        "Expected {:?}, got {:?}: {}",
        expected, decision.status, decision.explanation
    );
}

/// Asserts the outcome recorded for one check
///
/// # Panics
///
/// Panics if the check is missing from the findings or has another outcome
pub fn assert_finding(decision: &ClaimDecision, check: Check, expected: Outcome) {
    let finding = decision
        .findings
        .iter()
        .find(|f| f.check == check)
        .unwrap_or_else(|| {
            panic!(
                "No finding for {:?}; recorded: {:?}",
                check,
                decision.findings.iter().map(|f| f.check).collect::<Vec<_>>()
            )
        });
    assert_eq!(
        finding.outcome, expected,
        "Finding {:?} was {:?} ({})",
        check,
        finding.outcome,
        finding.note.as_deref().unwrap_or("no note")
    );
}

/// Asserts the approved amount is present and equal to `expected`
pub fn assert_approved(decision: &ClaimDecision, expected: Money) {
    match &decision.approved_amount {
        Some(amount) => assert_eq!(*amount, expected, "Approved amount mismatch"),
        None => panic!("Expected approved amount {}, got none ({:?})", expected, decision.status),
    }
}

/// Asserts that a JSON error body carries `error` and, optionally, a field
pub fn assert_error_body(body: &Value, error: &str, field: Option<&str>) {
    assert_eq!(body["error"], error, "Unexpected error body: {}", body);
    if let Some(field) = field {
        assert_eq!(body["field"], field, "Unexpected error field: {}", body);
    }
}
