//! PostgreSQL herb store for the allergy mapper

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{DomainPort, HealthCheckResult, HealthCheckable, PortError};
use domain_allergy::{Herb, HerbRisk, HerbStorePort};

use crate::adapters::claims::ping;
use crate::repositories::herbs::{HerbRepository, HerbRow};

#[derive(Debug, Clone)]
pub struct PostgresHerbStore {
    repository: HerbRepository,
    pool: PgPool,
}

impl PostgresHerbStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: HerbRepository::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresHerbStore {}

#[async_trait]
impl HealthCheckable for PostgresHerbStore {
    async fn health_check(&self) -> HealthCheckResult {
        ping(&self.pool, "postgres_herb_store").await
    }
}

#[async_trait]
impl HerbStorePort for PostgresHerbStore {
    #[instrument(skip(self), fields(functions = functions.len()))]
    async fn herbs_for_functions(&self, functions: &[String]) -> Result<Vec<Herb>, PortError> {
        if functions.is_empty() {
            return Ok(Vec::new());
        }

        let rows = self
            .repository
            .herbs_for_functions(functions)
            .await
            .map_err(PortError::from)?;

        debug!(count = rows.len(), "Fetched herbs");
        Ok(rows.into_iter().map(row_to_herb).collect())
    }
}

fn row_to_herb(row: HerbRow) -> Herb {
    let mut herb = Herb::new(row.herb_id, row.common_name);
    herb.sanskrit = row.sanskrit;
    herb.botanical = row.botanical_name;
    herb.risk = match row.risk_level {
        Some(level) => {
            let risk = HerbRisk::new(level);
            match row.risk_notes {
                Some(notes) if !notes.trim().is_empty() => risk.with_note(notes),
                _ => risk,
            }
        }
        None => HerbRisk::unknown(),
    };
    herb.refs = row.refs;
    herb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_risk_row_is_unknown() {
        let herb = row_to_herb(HerbRow {
            herb_id: "HRB010".to_string(),
            common_name: "Haritaki".to_string(),
            sanskrit: Some("Abhaya".to_string()),
            botanical_name: Some("Terminalia chebula".to_string()),
            risk_level: None,
            risk_notes: Some("ignored".to_string()),
            refs: Vec::new(),
        });
        assert_eq!(herb.risk, HerbRisk::unknown());
        assert_eq!(herb.botanical_name(), Some("Terminalia chebula"));
    }

    #[test]
    fn test_risk_notes_are_carried() {
        let herb = row_to_herb(HerbRow {
            herb_id: "HRB009".to_string(),
            common_name: "Garlic".to_string(),
            sanskrit: None,
            botanical_name: None,
            risk_level: Some("Moderate".to_string()),
            risk_notes: Some("Bleeding risk with anticoagulants".to_string()),
            refs: vec!["Charaka Samhita".to_string()],
        });
        assert_eq!(herb.risk.label, "Moderate");
        assert_eq!(herb.risk.notes, vec!["Bleeding risk with anticoagulants"]);
        assert_eq!(herb.refs.len(), 1);
    }
}
