//! Domain Adapters
//!
//! Adapter implementations connecting domain ports to PostgreSQL. Each
//! adapter:
//! - Implements the domain's port trait and `HealthCheckable`
//! - Translates repository rows into domain records
//! - Converts `DatabaseError` into `PortError`
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresHerbStore;
//! use domain_allergy::HerbStorePort;
//!
//! let store = PostgresHerbStore::new(pool);
//! let herbs = store.herbs_for_functions(&["antibacterial".to_string()]).await?;
//! ```

pub mod allergy;
pub mod claims;

pub use allergy::PostgresHerbStore;
pub use claims::{PostgresAuditLog, PostgresCatalogAdapter};
