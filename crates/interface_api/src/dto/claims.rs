//! Claims DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::Money;
use domain_claims::{Check, ClaimDecision, ClaimRequest, DecisionStatus, Finding, Outcome, PackageRecord, PlanRecord};
use domain_claims::request::DEFAULT_MONTHS_ENROLLED;

use crate::error::ApiError;

fn default_months_enrolled() -> u32 {
    DEFAULT_MONTHS_ENROLLED
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ValidateClaimRequest {
    #[validate(length(min = 1, message = "member_id must not be empty"))]
    pub member_id: String,
    /// Plan id or display name
    #[validate(length(min = 1, message = "plan_name must not be empty"))]
    pub plan_name: String,
    #[serde(alias = "diagnosis_code")]
    #[validate(length(min = 1, message = "icd_code must not be empty"))]
    pub icd_code: String,
    #[validate(length(min = 1, message = "package_id must not be empty"))]
    pub package_id: String,
    #[validate(length(min = 1, message = "admission_type must not be empty"))]
    pub admission_type: String,
    #[serde(default)]
    pub length_days: Option<u32>,
    #[serde(default)]
    pub estimated_cost_inr: Option<Decimal>,
    #[serde(default = "default_months_enrolled")]
    pub months_enrolled: u32,
}

impl ValidateClaimRequest {
    /// Validates the payload and converts it into a domain request
    pub fn into_claim_request(self) -> Result<ClaimRequest, ApiError> {
        self.validate()?;

        let mut request = ClaimRequest::new(
            self.member_id,
            self.plan_name,
            self.icd_code,
            self.package_id,
            self.admission_type,
        )
        .with_months_enrolled(self.months_enrolled);

        if let Some(days) = self.length_days {
            request = request.with_length_days(days);
        }
        if let Some(cost) = self.estimated_cost_inr {
            if cost.is_sign_negative() {
                return Err(ApiError::validation(
                    "estimated_cost_inr must not be negative",
                    Some("estimated_cost_inr"),
                ));
            }
            request = request.with_estimated_cost(Money::inr(cost));
        }
        Ok(request)
    }
}

#[derive(Debug, Serialize)]
pub struct FindingResponse {
    pub check: Check,
    pub result: Outcome,
    pub note: Option<String>,
}

impl From<Finding> for FindingResponse {
    fn from(finding: Finding) -> Self {
        Self {
            check: finding.check,
            result: finding.outcome,
            note: finding.note,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClaimDecisionResponse {
    /// Display label, e.g. "✅ Valid"
    pub claim_status: String,
    pub status: DecisionStatus,
    pub claim_score: f64,
    pub explanation: String,
    pub findings: Vec<FindingResponse>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub approved_amount_inr: Option<Decimal>,
    pub next_actions: Vec<String>,
}

impl From<ClaimDecision> for ClaimDecisionResponse {
    fn from(decision: ClaimDecision) -> Self {
        Self {
            claim_status: decision.status.label().to_string(),
            status: decision.status,
            claim_score: decision.score,
            explanation: decision.explanation,
            findings: decision.findings.into_iter().map(Into::into).collect(),
            approved_amount_inr: decision.approved_amount.map(|m| m.amount()),
            next_actions: decision.next_actions,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub plan_id: String,
    pub plan_name: String,
    pub tier: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub base_copay_percent: Decimal,
}

impl From<PlanRecord> for PlanResponse {
    fn from(plan: PlanRecord) -> Self {
        Self {
            plan_id: plan.id.as_str().to_string(),
            plan_name: plan.display_name,
            tier: plan.tier_label,
            base_copay_percent: plan.default_copay_percent,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PackageResponse {
    pub package_id: String,
    pub name: String,
    pub icd_code: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub tariff: Decimal,
}

impl From<PackageRecord> for PackageResponse {
    fn from(package: PackageRecord) -> Self {
        Self {
            package_id: package.id.as_str().to_string(),
            name: package.name,
            icd_code: package.linked_diagnosis_code.as_str().to_string(),
            tariff: package.base_price.amount(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PackageQuery {
    pub icd_code: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct ClaimsHealthResponse {
    pub ok: bool,
}
