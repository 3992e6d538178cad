//! Infrastructure Database Layer
//!
//! PostgreSQL persistence for SwasthyaSetu using SQLx: the claims catalog
//! (HBP packages, plans, coverage), the herb catalog used by the allergy
//! mapper, and the audit log.
//!
//! # Architecture
//!
//! The crate follows the repository pattern. Repositories own the SQL and
//! return row types; adapters map rows to domain records and implement the
//! domain ports, so the domain crates never see SQLx.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig};
//! use infra_db::adapters::PostgresCatalogAdapter;
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/swasthyasetu")).await?;
//! run_migrations(&pool).await?;
//! let catalog = PostgresCatalogAdapter::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, run_migrations, DatabaseConfig, DEFAULT_APPLICATION_NAME};
pub use error::DatabaseError;
