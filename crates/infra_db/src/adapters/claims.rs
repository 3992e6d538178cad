//! PostgreSQL adapters for the claims domain
//!
//! [`PostgresCatalogAdapter`] implements `CatalogPort` over the
//! [`CatalogRepository`], and [`PostgresAuditLog`] implements
//! `ClaimAuditPort` over the [`AuditRepository`].
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresCatalogAdapter;
//! use domain_claims::{CatalogPort, ClaimValidationService};
//!
//! let catalog: Arc<dyn CatalogPort> = Arc::new(PostgresCatalogAdapter::new(pool));
//! let service = ClaimValidationService::new(catalog);
//! ```

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{
    DiagnosisCode, DomainPort, HealthCheckResult, HealthCheckable, Money, PackageId, PlanId,
    PortError,
};
use domain_claims::{AuditEntry, CatalogPort, ClaimAuditPort, CoverageRecord, PackageRecord, PlanRecord};

use crate::error::DatabaseError;
use crate::repositories::audit::{AuditRepository, NewAuditEntry};
use crate::repositories::catalog::{CatalogRepository, CoverageRow, PackageRow, PlanRow};

/// PostgreSQL-backed implementation of `CatalogPort`
///
/// Database errors are translated to `PortError` through
/// `From<DatabaseError>`; stored values that do not fit the domain (such as a
/// negative stay length) surface as `PortError::Transformation`.
#[derive(Debug, Clone)]
pub struct PostgresCatalogAdapter {
    repository: CatalogRepository,
    pool: PgPool,
}

impl PostgresCatalogAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CatalogRepository::new(pool.clone()),
            pool,
        }
    }

    pub fn repository(&self) -> &CatalogRepository {
        &self.repository
    }
}

impl DomainPort for PostgresCatalogAdapter {}

#[async_trait]
impl HealthCheckable for PostgresCatalogAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        ping(&self.pool, "postgres_catalog").await
    }
}

#[async_trait]
impl CatalogPort for PostgresCatalogAdapter {
    #[instrument(skip(self), fields(package_id = %id))]
    async fn get_package(&self, id: &PackageId) -> Result<Option<PackageRecord>, PortError> {
        debug!("Fetching package");

        self.repository
            .get_package(id.as_str())
            .await
            .map_err(PortError::from)?
            .map(row_to_package)
            .transpose()
    }

    #[instrument(skip(self))]
    async fn resolve_plan(&self, input: &str) -> Result<Option<PlanRecord>, PortError> {
        debug!("Resolving plan");

        let row = self.repository.find_plan(input).await.map_err(PortError::from)?;
        Ok(row.map(row_to_plan))
    }

    #[instrument(skip(self), fields(plan_id = %plan_id, package_id = %package_id))]
    async fn get_coverage(
        &self,
        plan_id: &PlanId,
        package_id: &PackageId,
    ) -> Result<Option<CoverageRecord>, PortError> {
        debug!("Fetching coverage");

        self.repository
            .get_coverage(plan_id.as_str(), package_id.as_str())
            .await
            .map_err(PortError::from)?
            .map(row_to_coverage)
            .transpose()
    }

    #[instrument(skip(self))]
    async fn list_plans(&self) -> Result<Vec<PlanRecord>, PortError> {
        let rows = self.repository.list_plans().await.map_err(PortError::from)?;
        debug!(count = rows.len(), "Listed plans");
        Ok(rows.into_iter().map(row_to_plan).collect())
    }

    #[instrument(skip(self))]
    async fn list_packages(
        &self,
        icd_code: Option<&DiagnosisCode>,
        limit: u32,
    ) -> Result<Vec<PackageRecord>, PortError> {
        let rows = self
            .repository
            .list_packages(icd_code.map(DiagnosisCode::as_str), i64::from(limit))
            .await
            .map_err(PortError::from)?;
        debug!(count = rows.len(), "Listed packages");
        rows.into_iter().map(row_to_package).collect()
    }
}

/// PostgreSQL-backed audit sink for claim validations
#[derive(Debug, Clone)]
pub struct PostgresAuditLog {
    repository: AuditRepository,
    pool: PgPool,
}

impl PostgresAuditLog {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: AuditRepository::new(pool.clone()),
            pool,
        }
    }

    pub fn repository(&self) -> &AuditRepository {
        &self.repository
    }
}

impl DomainPort for PostgresAuditLog {}

#[async_trait]
impl HealthCheckable for PostgresAuditLog {
    async fn health_check(&self) -> HealthCheckResult {
        ping(&self.pool, "postgres_audit_log").await
    }
}

#[async_trait]
impl ClaimAuditPort for PostgresAuditLog {
    #[instrument(skip(self, entry), fields(audit_id = %entry.id, action = %entry.action))]
    async fn record(&self, entry: &AuditEntry) -> Result<(), PortError> {
        self.repository
            .insert(NewAuditEntry {
                audit_id: *entry.id.as_uuid(),
                action: entry.action.clone(),
                actor: entry.actor.as_ref().map(|m| m.as_str().to_string()),
                details: entry.details.clone(),
                recorded_at: entry.recorded_at,
            })
            .await
            .map_err(PortError::from)?;

        debug!("Audit entry recorded");
        Ok(())
    }
}

/// Runs `SELECT 1` against the pool and reports the round trip
pub(crate) async fn ping(pool: &PgPool, adapter_id: &str) -> HealthCheckResult {
    let start = std::time::Instant::now();

    let result = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await;

    let latency_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(_) => HealthCheckResult::healthy(adapter_id, latency_ms),
        Err(e) => HealthCheckResult::unhealthy(adapter_id, latency_ms, format!("Database error: {}", e)),
    }
}

// ============================================================================
// Row conversions
// ============================================================================

fn to_u32(value: i32, column: &str) -> Result<u32, PortError> {
    u32::try_from(value).map_err(|_| {
        PortError::from(DatabaseError::InvalidStoredValue(format!(
            "{} must not be negative, got {}",
            column, value
        )))
    })
}

fn row_to_package(row: PackageRow) -> Result<PackageRecord, PortError> {
    let mut package = PackageRecord::new(
        row.package_id,
        row.name,
        row.icd_code,
        Money::inr(row.base_tariff_inr),
    )
    .with_preauthorization(row.preauth_required);

    if let Some(days) = row.length_of_stay_days {
        package = package.with_stay_days(to_u32(days, "length_of_stay_days")?);
    }
    if let Some(notes) = row.notes {
        package = package.with_notes(notes);
    }
    Ok(package)
}

fn row_to_plan(row: PlanRow) -> PlanRecord {
    let plan = PlanRecord::new(row.plan_id, row.plan_name, row.base_copay_percent);
    match row.tier {
        Some(tier) => plan.with_tier(tier),
        None => plan,
    }
}

fn row_to_coverage(row: CoverageRow) -> Result<CoverageRecord, PortError> {
    Ok(CoverageRecord {
        plan_id: PlanId::new(row.plan_id),
        package_id: PackageId::new(row.package_id),
        is_covered: row.covered,
        copay_percent_override: row.copay_percent,
        sublimit_amount: row.sublimit_inr.map(Money::inr),
        waiting_period_months: row
            .waiting_months
            .map(|m| to_u32(m, "waiting_months"))
            .transpose()?,
        preauth_override: row.preauth_override,
        room_category_cap: row.room_cap,
        notes: row.notes,
    })
}
