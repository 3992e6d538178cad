//! Audit log repository
//!
//! The `audit_log` table is append-only.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::DatabaseError;

#[derive(Debug, Clone)]
pub struct AuditRepository {
    pool: PgPool,
}

impl AuditRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Appends one entry
    ///
    /// # Returns
    ///
    /// `DuplicateEntry` when the audit id was already recorded
    pub async fn insert(&self, entry: NewAuditEntry) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO audit_log (audit_id, action, actor, details, recorded_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(entry.audit_id)
        .bind(entry.action)
        .bind(entry.actor)
        .bind(entry.details)
        .bind(entry.recorded_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::Sql(e).classify())?;

        Ok(())
    }

    /// Most recent entries for one action, newest first
    pub async fn recent(&self, action: &str, limit: i64) -> Result<Vec<AuditRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, AuditRow>(
            r#"
            SELECT audit_id, action, actor, details, recorded_at
            FROM audit_log
            WHERE action = $1
            ORDER BY recorded_at DESC
            LIMIT $2
            "#,
        )
        .bind(action)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

/// Data for a new audit entry
#[derive(Debug, Clone)]
pub struct NewAuditEntry {
    pub audit_id: Uuid,
    pub action: String,
    pub actor: Option<String>,
    pub details: serde_json::Value,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct AuditRow {
    pub audit_id: Uuid,
    pub action: String,
    pub actor: Option<String>,
    pub details: serde_json::Value,
    pub recorded_at: DateTime<Utc>,
}
