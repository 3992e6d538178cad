//! Claims Domain Ports
//!
//! The evaluator itself is pure; everything it needs is fetched through
//! [`CatalogPort`] by the [`ClaimValidationService`](crate::ClaimValidationService).
//!
//! - **PostgreSQL adapter** (`infra_db`): the production catalog
//! - **In-memory adapter** ([`InMemoryCatalog`](crate::InMemoryCatalog)): the
//!   reference seed, used for local runs and tests
//!
//! ```rust,ignore
//! let catalog: Arc<dyn CatalogPort> = match config.catalog_source {
//!     CatalogSource::Postgres => Arc::new(PostgresCatalogAdapter::new(pool)),
//!     CatalogSource::Memory => Arc::new(InMemoryCatalog::reference()),
//! };
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{AuditEventId, DiagnosisCode, DomainPort, MemberId, PackageId, PlanId, PortError};

use crate::records::{CoverageRecord, PackageRecord, PlanRecord};

/// Read access to packages, plans and coverage
#[async_trait]
pub trait CatalogPort: DomainPort {
    async fn get_package(&self, id: &PackageId) -> Result<Option<PackageRecord>, PortError>;

    /// Resolves a plan by exact id, then by case-insensitive display name,
    /// after trimming the input
    async fn resolve_plan(&self, input: &str) -> Result<Option<PlanRecord>, PortError>;

    async fn get_coverage(
        &self,
        plan_id: &PlanId,
        package_id: &PackageId,
    ) -> Result<Option<CoverageRecord>, PortError>;

    async fn list_plans(&self) -> Result<Vec<PlanRecord>, PortError>;

    /// Packages ordered by id, optionally restricted to one ICD code
    async fn list_packages(
        &self,
        icd_code: Option<&DiagnosisCode>,
        limit: u32,
    ) -> Result<Vec<PackageRecord>, PortError>;
}

/// One audit trail entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: AuditEventId,
    pub action: String,
    pub actor: Option<MemberId>,
    pub details: serde_json::Value,
    pub recorded_at: DateTime<Utc>,
}

impl AuditEntry {
    pub fn new(action: impl Into<String>, actor: Option<MemberId>, details: serde_json::Value) -> Self {
        Self {
            id: AuditEventId::new(),
            action: action.into(),
            actor,
            details,
            recorded_at: Utc::now(),
        }
    }
}

/// Append-only sink for validation audit entries
#[async_trait]
pub trait ClaimAuditPort: DomainPort {
    async fn record(&self, entry: &AuditEntry) -> Result<(), PortError>;
}
