//! Claims domain errors

use serde::{Deserialize, Serialize};
use thiserror::Error;

use core_kernel::{MoneyError, PackageId, PlanId, PortError};

/// A plan the caller could have meant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSuggestion {
    pub plan_name: String,
    pub plan_id: PlanId,
}

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Unknown package_id: {package_id}")]
    UnknownPackage { package_id: PackageId },

    #[error("Unknown plan: {input}")]
    UnknownPlan {
        input: String,
        suggestions: Vec<PlanSuggestion>,
    },

    #[error("Invalid claim request: {0}")]
    InvalidRequest(String),

    #[error("Amount calculation failed: {0}")]
    Money(#[from] MoneyError),

    #[error("Catalog access failed: {0}")]
    Catalog(#[from] PortError),
}

impl ClaimError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClaimError::UnknownPackage { .. } | ClaimError::UnknownPlan { .. })
    }
}
