//! Claim validation service
//!
//! Orchestrates one validation: look the package up, resolve the plan, fetch
//! the coverage row, hand everything to the pure [`evaluate`] and record an
//! audit entry. An audit write that fails is logged and otherwise ignored.

use std::sync::Arc;

use serde_json::json;
use tracing::{info, instrument, warn};

use core_kernel::{DiagnosisCode, HealthCheckResult};

use crate::decision::ClaimDecision;
use crate::error::{ClaimError, PlanSuggestion};
use crate::evaluator::evaluate;
use crate::ports::{AuditEntry, CatalogPort, ClaimAuditPort};
use crate::records::{PackageRecord, PlanRecord};
use crate::request::ClaimRequest;

/// Audit action recorded for every evaluated claim
pub const VALIDATE_CLAIM_ACTION: &str = "validate_claim";

/// Default page size for package listings
pub const DEFAULT_PACKAGE_LIMIT: u32 = 100;

#[derive(Clone)]
pub struct ClaimValidationService {
    catalog: Arc<dyn CatalogPort>,
    audit: Option<Arc<dyn ClaimAuditPort>>,
}

impl ClaimValidationService {
    pub fn new(catalog: Arc<dyn CatalogPort>) -> Self {
        Self {
            catalog,
            audit: None,
        }
    }

    pub fn with_audit(mut self, audit: Arc<dyn ClaimAuditPort>) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Validates a claim and returns the decision
    ///
    /// # Errors
    ///
    /// - `UnknownPackage` when the package id is not in the catalog
    /// - `UnknownPlan` when neither a plan id nor a display name matches,
    ///   carrying every plan as a suggestion
    /// - `Catalog` when the catalog itself fails
    #[instrument(skip(self, request), fields(member = %request.member_id, package = %request.package_id))]
    pub async fn validate(&self, request: &ClaimRequest) -> Result<ClaimDecision, ClaimError> {
        let package = self
            .catalog
            .get_package(&request.package_id)
            .await?
            .ok_or_else(|| ClaimError::UnknownPackage {
                package_id: request.package_id.clone(),
            })?;

        let plan = match self.catalog.resolve_plan(&request.plan_name).await? {
            Some(plan) => plan,
            None => return Err(self.unknown_plan(&request.plan_name).await?),
        };

        let coverage = self.catalog.get_coverage(&plan.id, &package.id).await?;
        let decision = evaluate(request, &package, &plan, coverage.as_ref())?;

        info!(
            status = ?decision.status,
            score = decision.score,
            "Claim evaluated"
        );
        self.record_audit(request, &decision).await;

        Ok(decision)
    }

    pub async fn list_plans(&self) -> Result<Vec<PlanRecord>, ClaimError> {
        Ok(self.catalog.list_plans().await?)
    }

    pub async fn list_packages(
        &self,
        icd_code: Option<&DiagnosisCode>,
        limit: Option<u32>,
    ) -> Result<Vec<PackageRecord>, ClaimError> {
        let limit = limit.unwrap_or(DEFAULT_PACKAGE_LIMIT);
        Ok(self.catalog.list_packages(icd_code, limit).await?)
    }

    /// Confirms the catalog answers queries
    pub async fn health(&self) -> HealthCheckResult {
        let started = std::time::Instant::now();
        let result = self.catalog.list_plans().await;
        let latency_ms = started.elapsed().as_millis() as u64;
        match result {
            Ok(_) => HealthCheckResult::healthy("claims_catalog", latency_ms),
            Err(e) => HealthCheckResult::unhealthy("claims_catalog", latency_ms, e.to_string()),
        }
    }

    async fn unknown_plan(&self, input: &str) -> Result<ClaimError, ClaimError> {
        let suggestions = self
            .catalog
            .list_plans()
            .await?
            .into_iter()
            .map(|plan| PlanSuggestion {
                plan_name: plan.display_name,
                plan_id: plan.id,
            })
            .collect();

        Ok(ClaimError::UnknownPlan {
            input: input.to_string(),
            suggestions,
        })
    }

    async fn record_audit(&self, request: &ClaimRequest, decision: &ClaimDecision) {
        let Some(audit) = &self.audit else {
            return;
        };

        let entry = AuditEntry::new(
            VALIDATE_CLAIM_ACTION,
            Some(request.member_id.clone()),
            json!({
                "member_id": request.member_id,
                "package_id": request.package_id,
                "plan": request.plan_name,
                "status": decision.status,
                "score": decision.score,
            }),
        );

        if let Err(e) = audit.record(&entry).await {
            warn!(error = %e, audit_id = %entry.id, "Failed to write claim audit entry");
        }
    }
}
