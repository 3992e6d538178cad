//! Claim decision evaluator
//!
//! [`evaluate`] is a pure function of the request and the three catalog rows
//! the caller looked up. It performs no I/O and holds no state, so identical
//! inputs always produce identical decisions.
//!
//! The checks run in a fixed order. Each appends findings; a check that ends
//! the evaluation returns a [`Terminal`] and the remaining checks never run.

use rust_decimal::Decimal;

use core_kernel::Money;
use crate::decision::{ClaimDecision, DecisionStatus};
use crate::error::ClaimError;
use crate::finding::{Check, Finding, Outcome};
use crate::records::{CoverageRecord, PackageRecord, PlanRecord};
use crate::request::ClaimRequest;
use crate::score::score;

/// An early, non-approving end to the pipeline
#[derive(Debug, Clone, PartialEq)]
struct Terminal {
    status: DecisionStatus,
    explanation: String,
    next_actions: Vec<String>,
}

impl Terminal {
    fn denied(explanation: impl Into<String>) -> Self {
        Self {
            status: DecisionStatus::Denied,
            explanation: explanation.into(),
            next_actions: Vec::new(),
        }
    }

    fn with_actions<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.next_actions = actions.into_iter().map(Into::into).collect();
        self
    }
}

/// What the gating checks established about a payable claim
struct Gate<'a> {
    coverage: &'a CoverageRecord,
    preauth_needed: bool,
}

/// Financial outcome of an approved claim
#[derive(Debug, Clone, PartialEq)]
struct Settlement {
    estimated: Money,
    approved_base: Money,
    sublimit: Option<Money>,
    copay_percent: Decimal,
    payout: Money,
}

struct Evaluation<'a> {
    request: &'a ClaimRequest,
    package: &'a PackageRecord,
    plan: &'a PlanRecord,
    coverage: Option<&'a CoverageRecord>,
    findings: Vec<Finding>,
}

/// Evaluates a claim against its package, resolved plan and coverage row
///
/// # Errors
///
/// Only arithmetic failures (mixed currencies, an out-of-range co-pay) are
/// errors. Exclusions, unmet waiting periods and required pre-authorization
/// are decisions.
pub fn evaluate(
    request: &ClaimRequest,
    package: &PackageRecord,
    plan: &PlanRecord,
    coverage: Option<&CoverageRecord>,
) -> Result<ClaimDecision, ClaimError> {
    let mut evaluation = Evaluation {
        request,
        package,
        plan,
        coverage,
        findings: Vec::with_capacity(9),
    };

    match evaluation.run_checks() {
        Ok(gate) => {
            let settlement = evaluation.settle(&gate)?;
            Ok(evaluation.approve(&gate, settlement))
        }
        Err(terminal) => Ok(evaluation.conclude(terminal)),
    }
}

impl<'a> Evaluation<'a> {
    fn run_checks(&mut self) -> Result<Gate<'a>, Terminal> {
        self.check_diagnosis()?;
        self.check_plan();
        let coverage = self.check_coverage()?;
        self.check_waiting(coverage)?;
        let preauth_needed = self.check_preauthorization(coverage)?;
        self.check_admission();

        Ok(Gate {
            coverage,
            preauth_needed,
        })
    }

    fn check_diagnosis(&mut self) -> Result<(), Terminal> {
        let linked = &self.package.linked_diagnosis_code;
        let claimed = &self.request.diagnosis_code;

        if linked != claimed {
            self.findings.push(Finding::fail(
                Check::PkgIcdMatch,
                format!("Package maps to ICD {linked}, not {claimed}"),
            ));
            return Err(Terminal::denied(format!(
                "Package {} is linked to ICD {linked}, not {claimed}.",
                self.package.id
            ))
            .with_actions(["Pick the correct HBP package for this ICD"]));
        }

        self.findings.push(Finding::pass(Check::IcdValid));
        self.findings.push(Finding::pass(Check::PkgIcdMatch));
        Ok(())
    }

    fn check_plan(&mut self) {
        self.findings.push(Finding::pass(Check::PlanExists));
    }

    fn check_coverage(&mut self) -> Result<&'a CoverageRecord, Terminal> {
        match self.coverage {
            Some(coverage) if coverage.is_covered => {
                self.findings.push(Finding::pass(Check::Coverage));
                Ok(coverage)
            }
            _ => {
                self.findings
                    .push(Finding::fail(Check::Coverage, "Excluded under this plan"));
                Err(Terminal::denied(
                    "This ICD/package is excluded under the selected plan.",
                ))
            }
        }
    }

    fn check_waiting(&mut self, coverage: &CoverageRecord) -> Result<(), Terminal> {
        let waiting = coverage.waiting_months();
        let enrolled = self.request.months_enrolled;

        if enrolled < waiting {
            let remaining = waiting - enrolled;
            self.findings.push(Finding::fail(
                Check::Waiting,
                format!("{remaining} months remaining"),
            ));
            return Err(Terminal::denied(format!(
                "Waiting period not completed ({waiting} months)."
            ))
            .with_actions([format!("Complete {remaining} more month(s) of enrollment")]));
        }

        self.findings.push(Finding::pass(Check::Waiting));
        Ok(())
    }

    fn check_preauthorization(&mut self, coverage: &CoverageRecord) -> Result<bool, Terminal> {
        let needed = coverage.preauth_override || self.package.requires_preauthorization;

        if needed && self.request.is_elective() {
            self.findings
                .push(Finding::new(Check::Preauth, Outcome::Required));
            return Err(Terminal {
                status: DecisionStatus::NeedsPreauth,
                explanation: "Pre-authorization required for this package (elective admission)."
                    .to_string(),
                next_actions: vec![
                    "Submit pre-authorization form".to_string(),
                    "Upload doctor's notes".to_string(),
                ],
            });
        }

        let outcome = if needed { Outcome::Pass } else { Outcome::NotApplicable };
        self.findings.push(Finding::new(Check::Preauth, outcome));
        Ok(needed)
    }

    fn check_admission(&mut self) {
        self.findings.push(Finding::pass(Check::Admission));
    }

    fn settle(&mut self, gate: &Gate<'_>) -> Result<Settlement, ClaimError> {
        let estimated = self.request.estimated_cost.unwrap_or(self.package.base_price);
        let sublimit = gate.coverage.effective_sublimit();
        let approved_base = match sublimit {
            Some(limit) => estimated.checked_min(&limit)?,
            None => estimated,
        };

        let copay_percent = gate.coverage.effective_copay(self.plan);
        let copay = approved_base.percentage(copay_percent)?.floor();
        let payout = approved_base.checked_sub(&copay)?;

        match sublimit {
            Some(limit) => self.findings.push(Finding::with_note(
                Check::Sublimit,
                Outcome::Applied,
                limit.to_string(),
            )),
            None => self
                .findings
                .push(Finding::new(Check::Sublimit, Outcome::NotApplicable)),
        }
        self.findings.push(Finding::with_note(
            Check::Copay,
            Outcome::Applied,
            format!("{}%", copay_percent.normalize()),
        ));

        Ok(Settlement {
            estimated,
            approved_base,
            sublimit,
            copay_percent,
            payout,
        })
    }

    fn approve(self, gate: &Gate<'_>, settlement: Settlement) -> ClaimDecision {
        let status = if settlement.approved_base == settlement.estimated {
            DecisionStatus::Valid
        } else {
            DecisionStatus::Partial
        };

        let mut sentences = vec![format!("Covered under {}.", self.plan.display_name)];
        if !gate.preauth_needed {
            sentences.push("Pre-auth not required.".to_string());
        }
        if let Some(limit) = settlement.sublimit {
            sentences.push(format!("Sub-limit {limit}."));
        }
        sentences.push(format!(
            "Subject to {}% co-pay.",
            settlement.copay_percent.normalize()
        ));

        ClaimDecision {
            status,
            score: score(&self.findings),
            explanation: sentences.join(" "),
            findings: self.findings,
            approved_amount: Some(settlement.payout),
            next_actions: Vec::new(),
        }
    }

    fn conclude(self, terminal: Terminal) -> ClaimDecision {
        ClaimDecision {
            status: terminal.status,
            score: score(&self.findings),
            explanation: terminal.explanation,
            findings: self.findings,
            approved_amount: None,
            next_actions: terminal.next_actions,
        }
    }
}
