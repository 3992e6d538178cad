//! Claims catalog repository
//!
//! Read-only access to `hbp_packages`, `plans` and `plan_coverage`. Rows are
//! written by the seed migration or a bulk import, never by the evaluator.

use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

use crate::error::DatabaseError;

/// Repository for the HBP package and plan catalog
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    /// Creates a new CatalogRepository with the given connection pool
    ///
    /// # Arguments
    ///
    /// * `pool` - The PostgreSQL connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_package(&self, package_id: &str) -> Result<Option<PackageRow>, DatabaseError> {
        let row = sqlx::query_as::<_, PackageRow>(
            r#"
            SELECT package_id, name, icd_code, base_tariff_inr, preauth_required,
                   length_of_stay_days, notes
            FROM hbp_packages
            WHERE package_id = $1
            "#,
        )
        .bind(package_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Finds a plan by exact id or by case-insensitive name
    ///
    /// The input is trimmed first. When one row matches by id and another by
    /// name, the id match wins.
    pub async fn find_plan(&self, input: &str) -> Result<Option<PlanRow>, DatabaseError> {
        let input = input.trim();
        let row = sqlx::query_as::<_, PlanRow>(
            r#"
            SELECT plan_id, plan_name, tier, base_copay_percent
            FROM plans
            WHERE plan_id = $1 OR lower(plan_name) = lower($1)
            ORDER BY (plan_id = $1) DESC
            LIMIT 1
            "#,
        )
        .bind(input)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_coverage(
        &self,
        plan_id: &str,
        package_id: &str,
    ) -> Result<Option<CoverageRow>, DatabaseError> {
        let row = sqlx::query_as::<_, CoverageRow>(
            r#"
            SELECT plan_id, package_id, covered, copay_percent, sublimit_inr,
                   waiting_months, preauth_override, room_cap, notes
            FROM plan_coverage
            WHERE plan_id = $1 AND package_id = $2
            "#,
        )
        .bind(plan_id)
        .bind(package_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn list_plans(&self) -> Result<Vec<PlanRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, PlanRow>(
            r#"
            SELECT plan_id, plan_name, tier, base_copay_percent
            FROM plans
            ORDER BY plan_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Lists packages ordered by id
    ///
    /// # Arguments
    ///
    /// * `icd_code` - Restricts the listing to one diagnosis code when present
    /// * `limit` - Maximum number of rows
    pub async fn list_packages(
        &self,
        icd_code: Option<&str>,
        limit: i64,
    ) -> Result<Vec<PackageRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, PackageRow>(
            r#"
            SELECT package_id, name, icd_code, base_tariff_inr, preauth_required,
                   length_of_stay_days, notes
            FROM hbp_packages
            WHERE ($1::TEXT IS NULL OR icd_code = $1)
            ORDER BY package_id
            LIMIT $2
            "#,
        )
        .bind(icd_code)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

/// Database row for an HBP package
#[derive(Debug, Clone, FromRow)]
pub struct PackageRow {
    pub package_id: String,
    pub name: String,
    pub icd_code: String,
    pub base_tariff_inr: Decimal,
    pub preauth_required: bool,
    pub length_of_stay_days: Option<i32>,
    pub notes: Option<String>,
}

/// Database row for a plan
#[derive(Debug, Clone, FromRow)]
pub struct PlanRow {
    pub plan_id: String,
    pub plan_name: String,
    pub tier: Option<String>,
    pub base_copay_percent: Decimal,
}

/// Database row for plan coverage of one package
#[derive(Debug, Clone, FromRow)]
pub struct CoverageRow {
    pub plan_id: String,
    pub package_id: String,
    pub covered: bool,
    pub copay_percent: Option<Decimal>,
    pub sublimit_inr: Option<Decimal>,
    pub waiting_months: Option<i32>,
    pub preauth_override: bool,
    pub room_cap: Option<String>,
    pub notes: Option<String>,
}
