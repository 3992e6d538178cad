//! In-memory catalog adapter
//!
//! [`InMemoryCatalog::reference`] carries the same three packages, three
//! plans and seven coverage rows that the database migration seeds, so the
//! service can run without PostgreSQL.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use rust_decimal_macros::dec;

use core_kernel::{
    DiagnosisCode, DomainPort, HealthCheckResult, HealthCheckable, Money, PackageId, PlanId,
    PortError,
};

use crate::ports::{AuditEntry, CatalogPort, ClaimAuditPort};
use crate::records::{CoverageRecord, PackageRecord, PlanRecord};

/// Catalog held entirely in memory
#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalog {
    packages: BTreeMap<PackageId, PackageRecord>,
    plans: Vec<PlanRecord>,
    coverage: BTreeMap<(PlanId, PackageId), CoverageRecord>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The reference HBP catalog
    pub fn reference() -> Self {
        Self::new()
            .with_package(
                PackageRecord::new(
                    "PKG001",
                    "Fracture of Lower End of Radius Treatment",
                    "S52.5",
                    Money::inr(dec!(25000)),
                )
                .with_stay_days(3)
                .with_notes("Standard orthopedic care"),
            )
            .with_package(
                PackageRecord::new("PKG002", "Type 2 Diabetes Management", "E11", Money::inr(dec!(15000)))
                    .with_preauthorization(true)
                    .with_stay_days(5)
                    .with_notes("Includes medication and monitoring"),
            )
            .with_package(
                PackageRecord::new("PKG003", "Hypertension Treatment", "I10", Money::inr(dec!(12000)))
                    .with_stay_days(2)
                    .with_notes("Basic cardiovascular care"),
            )
            .with_plan(PlanRecord::new("PLAN_BASIC", "Basic Plan", dec!(20)).with_tier("Bronze"))
            .with_plan(PlanRecord::new("PLAN_STANDARD", "Standard Plan", dec!(15)).with_tier("Silver"))
            .with_plan(PlanRecord::new("PLAN_PREMIUM", "Premium Plan", dec!(10)).with_tier("Gold"))
            .with_coverage(
                CoverageRecord::covered("PLAN_BASIC", "PKG001")
                    .with_copay(dec!(20))
                    .with_sublimit(Money::inr(dec!(20000)))
                    .with_waiting_months(3)
                    .with_room_cap("Shared"),
            )
            .with_coverage(CoverageRecord::excluded("PLAN_BASIC", "PKG002"))
            .with_coverage(
                CoverageRecord::covered("PLAN_STANDARD", "PKG001")
                    .with_copay(dec!(15))
                    .with_sublimit(Money::inr(dec!(25000)))
                    .with_waiting_months(1)
                    .with_room_cap("Semi-private"),
            )
            .with_coverage(
                CoverageRecord::covered("PLAN_STANDARD", "PKG002")
                    .with_copay(dec!(15))
                    .with_waiting_months(6)
                    .with_preauth_override(true)
                    .with_room_cap("Semi-private"),
            )
            .with_coverage(premium("PKG001"))
            .with_coverage(premium("PKG002"))
            .with_coverage(premium("PKG003"))
    }

    pub fn with_package(mut self, package: PackageRecord) -> Self {
        self.packages.insert(package.id.clone(), package);
        self
    }

    /// Adds a plan, replacing any plan with the same id
    pub fn with_plan(mut self, plan: PlanRecord) -> Self {
        self.plans.retain(|p| p.id != plan.id);
        self.plans.push(plan);
        self
    }

    pub fn with_coverage(mut self, coverage: CoverageRecord) -> Self {
        self.coverage.insert(
            (coverage.plan_id.clone(), coverage.package_id.clone()),
            coverage,
        );
        self
    }
}

fn premium(package_id: &str) -> CoverageRecord {
    CoverageRecord::covered("PLAN_PREMIUM", package_id)
        .with_copay(dec!(10))
        .with_waiting_months(0)
        .with_room_cap("Private")
}

impl DomainPort for InMemoryCatalog {}

#[async_trait]
impl CatalogPort for InMemoryCatalog {
    async fn get_package(&self, id: &PackageId) -> Result<Option<PackageRecord>, PortError> {
        Ok(self.packages.get(id).cloned())
    }

    async fn resolve_plan(&self, input: &str) -> Result<Option<PlanRecord>, PortError> {
        let input = input.trim();
        let by_id = self.plans.iter().find(|p| p.id.as_str() == input);
        Ok(by_id
            .or_else(|| self.plans.iter().find(|p| p.answers_to(input)))
            .cloned())
    }

    async fn get_coverage(
        &self,
        plan_id: &PlanId,
        package_id: &PackageId,
    ) -> Result<Option<CoverageRecord>, PortError> {
        Ok(self
            .coverage
            .get(&(plan_id.clone(), package_id.clone()))
            .cloned())
    }

    async fn list_plans(&self) -> Result<Vec<PlanRecord>, PortError> {
        Ok(self.plans.clone())
    }

    async fn list_packages(
        &self,
        icd_code: Option<&DiagnosisCode>,
        limit: u32,
    ) -> Result<Vec<PackageRecord>, PortError> {
        Ok(self
            .packages
            .values()
            .filter(|p| icd_code.map_or(true, |code| &p.linked_diagnosis_code == code))
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl HealthCheckable for InMemoryCatalog {
    async fn health_check(&self) -> HealthCheckResult {
        if self.plans.is_empty() {
            HealthCheckResult::unhealthy("in_memory_catalog", 0, "No plans loaded")
        } else {
            HealthCheckResult::healthy("in_memory_catalog", 0)
        }
    }
}

/// Audit sink that keeps entries in memory
#[derive(Debug, Default)]
pub struct InMemoryAuditLog {
    entries: RwLock<Vec<AuditEntry>>,
}

impl InMemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries
            .read()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }
}

impl DomainPort for InMemoryAuditLog {}

#[async_trait]
impl ClaimAuditPort for InMemoryAuditLog {
    async fn record(&self, entry: &AuditEntry) -> Result<(), PortError> {
        self.entries
            .write()
            .map_err(|_| PortError::internal("audit log lock poisoned"))?
            .push(entry.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reference_catalog_counts() {
        let catalog = InMemoryCatalog::reference();
        assert_eq!(catalog.list_plans().await.unwrap().len(), 3);
        assert_eq!(catalog.list_packages(None, 100).await.unwrap().len(), 3);
        assert_eq!(catalog.coverage.len(), 7);
    }

    #[tokio::test]
    async fn test_list_packages_filters_and_limits() {
        let catalog = InMemoryCatalog::reference();
        let e11 = DiagnosisCode::new("E11");
        let filtered = catalog.list_packages(Some(&e11), 100).await.unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id.as_str(), "PKG002");

        let limited = catalog.list_packages(None, 2).await.unwrap();
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[0].id.as_str(), "PKG001");
    }
}
