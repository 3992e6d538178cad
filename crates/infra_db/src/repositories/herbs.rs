//! Herb catalog repository

use sqlx::{FromRow, PgPool};

use crate::error::DatabaseError;

#[derive(Debug, Clone)]
pub struct HerbRepository {
    pool: PgPool,
}

impl HerbRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Herbs linked to any of the given function names, with risk and references
    ///
    /// One row per herb, ordered by common name. Herbs without a `risks` row
    /// come back with a `NULL` risk level.
    pub async fn herbs_for_functions(&self, functions: &[String]) -> Result<Vec<HerbRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, HerbRow>(
            r#"
            SELECT h.herb_id,
                   h.common_name,
                   h.sanskrit,
                   h.botanical_name,
                   r.risk_level,
                   r.notes AS risk_notes,
                   COALESCE(
                       (SELECT array_agg(rf.reference ORDER BY rf.ref_id)
                        FROM refs rf
                        WHERE rf.herb_id = h.herb_id),
                       ARRAY[]::TEXT[]
                   ) AS refs
            FROM herbs h
            LEFT JOIN risks r ON r.herb_id = h.herb_id
            WHERE EXISTS (
                SELECT 1
                FROM herb_functions hf
                JOIN functions f ON f.function_id = hf.function_id
                WHERE hf.herb_id = h.herb_id
                  AND f.function_name = ANY($1)
            )
            ORDER BY h.common_name
            "#,
        )
        .bind(functions)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct HerbRow {
    pub herb_id: String,
    pub common_name: String,
    pub sanskrit: Option<String>,
    pub botanical_name: Option<String>,
    pub risk_level: Option<String>,
    pub risk_notes: Option<String>,
    pub refs: Vec<String>,
}
