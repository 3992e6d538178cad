//! Catalog records: HBP packages, plans and plan coverage
//!
//! These rows are created by seed or import and are never mutated by the
//! evaluator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{DiagnosisCode, Money, PackageId, PlanId};

/// A predefined treatment bundle with a fixed diagnosis linkage and base price
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRecord {
    pub id: PackageId,
    pub name: String,
    /// ICD-10 code the package is valid for
    pub linked_diagnosis_code: DiagnosisCode,
    /// Base tariff in INR
    pub base_price: Money,
    pub requires_preauthorization: bool,
    pub default_stay_days: Option<u32>,
    pub notes: Option<String>,
}

impl PackageRecord {
    pub fn new(
        id: impl Into<PackageId>,
        name: impl Into<String>,
        linked_diagnosis_code: impl Into<DiagnosisCode>,
        base_price: Money,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            linked_diagnosis_code: linked_diagnosis_code.into(),
            base_price,
            requires_preauthorization: false,
            default_stay_days: None,
            notes: None,
        }
    }

    pub fn with_preauthorization(mut self, required: bool) -> Self {
        self.requires_preauthorization = required;
        self
    }

    pub fn with_stay_days(mut self, days: u32) -> Self {
        self.default_stay_days = Some(days);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// An insurance plan tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRecord {
    pub id: PlanId,
    /// Unique, matched case-insensitively during plan resolution
    pub display_name: String,
    pub tier_label: Option<String>,
    pub default_copay_percent: Decimal,
}

impl PlanRecord {
    pub fn new(id: impl Into<PlanId>, display_name: impl Into<String>, default_copay_percent: Decimal) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            tier_label: None,
            default_copay_percent,
        }
    }

    pub fn with_tier(mut self, tier: impl Into<String>) -> Self {
        self.tier_label = Some(tier.into());
        self
    }

    /// True when `input` names this plan, by exact id or case-insensitive display name
    ///
    /// Case folding is Unicode-aware, matching PostgreSQL's `lower()`.
    pub fn answers_to(&self, input: &str) -> bool {
        let input = input.trim();
        self.id.as_str() == input || self.display_name.to_lowercase() == input.to_lowercase()
    }
}

/// Terms under which a plan covers a package, keyed by `(plan_id, package_id)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageRecord {
    pub plan_id: PlanId,
    pub package_id: PackageId,
    pub is_covered: bool,
    /// Wins over the plan's default co-pay when present
    pub copay_percent_override: Option<Decimal>,
    pub sublimit_amount: Option<Money>,
    pub waiting_period_months: Option<u32>,
    pub preauth_override: bool,
    pub room_category_cap: Option<String>,
    pub notes: Option<String>,
}

impl CoverageRecord {
    /// A covered row with no overrides
    pub fn covered(plan_id: impl Into<PlanId>, package_id: impl Into<PackageId>) -> Self {
        Self {
            plan_id: plan_id.into(),
            package_id: package_id.into(),
            is_covered: true,
            copay_percent_override: None,
            sublimit_amount: None,
            waiting_period_months: None,
            preauth_override: false,
            room_category_cap: None,
            notes: None,
        }
    }

    /// An explicit exclusion row
    pub fn excluded(plan_id: impl Into<PlanId>, package_id: impl Into<PackageId>) -> Self {
        Self {
            is_covered: false,
            ..Self::covered(plan_id, package_id)
        }
    }

    pub fn with_copay(mut self, percent: Decimal) -> Self {
        self.copay_percent_override = Some(percent);
        self
    }

    pub fn with_sublimit(mut self, amount: Money) -> Self {
        self.sublimit_amount = Some(amount);
        self
    }

    pub fn with_waiting_months(mut self, months: u32) -> Self {
        self.waiting_period_months = Some(months);
        self
    }

    pub fn with_preauth_override(mut self, required: bool) -> Self {
        self.preauth_override = required;
        self
    }

    pub fn with_room_cap(mut self, room: impl Into<String>) -> Self {
        self.room_category_cap = Some(room.into());
        self
    }

    /// Waiting period in months; an absent value means none
    pub fn waiting_months(&self) -> u32 {
        self.waiting_period_months.unwrap_or(0)
    }

    /// Sub-limit that caps the claim; a stored zero means no cap
    pub fn effective_sublimit(&self) -> Option<Money> {
        self.sublimit_amount.filter(|limit| !limit.is_zero())
    }

    /// Co-pay percent for this row, falling back to the plan default
    pub fn effective_copay(&self, plan: &PlanRecord) -> Decimal {
        self.copay_percent_override.unwrap_or(plan.default_copay_percent)
    }
}
