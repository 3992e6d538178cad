//! Claim request submitted for validation

use serde::{Deserialize, Serialize};

use core_kernel::{DiagnosisCode, MemberId, Money, PackageId};

/// Months of enrollment assumed when the caller does not say
pub const DEFAULT_MONTHS_ENROLLED: u32 = 12;

/// A claim to validate. Constructed per call, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRequest {
    pub member_id: MemberId,
    /// Plan id or display name, as typed by the caller
    pub plan_name: String,
    pub diagnosis_code: DiagnosisCode,
    pub package_id: PackageId,
    /// "elective", "emergency", ...
    pub admission_type: String,
    pub requested_length_days: Option<u32>,
    pub estimated_cost: Option<Money>,
    pub months_enrolled: u32,
}

impl ClaimRequest {
    pub fn new(
        member_id: impl Into<MemberId>,
        plan_name: impl Into<String>,
        diagnosis_code: impl Into<DiagnosisCode>,
        package_id: impl Into<PackageId>,
        admission_type: impl Into<String>,
    ) -> Self {
        Self {
            member_id: member_id.into(),
            plan_name: plan_name.into(),
            diagnosis_code: diagnosis_code.into(),
            package_id: package_id.into(),
            admission_type: admission_type.into(),
            requested_length_days: None,
            estimated_cost: None,
            months_enrolled: DEFAULT_MONTHS_ENROLLED,
        }
    }

    pub fn with_estimated_cost(mut self, cost: Money) -> Self {
        self.estimated_cost = Some(cost);
        self
    }

    pub fn with_months_enrolled(mut self, months: u32) -> Self {
        self.months_enrolled = months;
        self
    }

    pub fn with_length_days(mut self, days: u32) -> Self {
        self.requested_length_days = Some(days);
        self
    }

    pub fn is_elective(&self) -> bool {
        self.admission_type.eq_ignore_ascii_case("elective")
    }
}
