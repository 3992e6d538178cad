//! PostgreSQL pool and migrations

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tracing::info;

use crate::error::DatabaseError;

/// Type alias for the PostgreSQL connection pool
pub type DatabasePool = PgPool;

/// Name reported in `pg_stat_activity` unless overridden
pub const DEFAULT_APPLICATION_NAME: &str = "swasthyasetu";

/// Pool settings for the catalog, herb and audit tables
///
/// The workload is short point lookups plus one audit insert per claim, so
/// the defaults keep the pool small.
///
/// ```rust
/// use std::time::Duration;
/// use infra_db::DatabaseConfig;
///
/// let config = DatabaseConfig::new("postgres://localhost/swasthyasetu")
///     .max_connections(8)
///     .acquire_timeout(Duration::from_secs(5));
/// assert_eq!(config.max_connections, 8);
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// How long a request waits for a free connection
    pub acquire_timeout: Duration,
    pub application_name: String,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 5,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(10),
            application_name: DEFAULT_APPLICATION_NAME.to_string(),
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min.min(self.max_connections);
        self
    }

    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    pub fn application_name(mut self, name: impl Into<String>) -> Self {
        self.application_name = name.into();
        self
    }

    fn connect_options(&self) -> Result<PgConnectOptions, DatabaseError> {
        PgConnectOptions::from_str(&self.url)
            .map(|options| options.application_name(&self.application_name))
            .map_err(|e| DatabaseError::ConnectionFailed(format!("invalid database url: {}", e)))
    }
}

/// Opens the pool and checks one connection
///
/// # Errors
///
/// `DatabaseError::ConnectionFailed` for a malformed URL or an unreachable server
pub async fn create_pool(config: DatabaseConfig) -> Result<DatabasePool, DatabaseError> {
    let options = config.connect_options()?;
    info!(
        host = options.get_host(),
        database = options.get_database().unwrap_or_default(),
        max_connections = config.max_connections,
        "Opening PostgreSQL pool"
    );

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout)
        .test_before_acquire(true)
        .connect_with(options)
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))
}

/// Applies `migrations/` (schema plus reference seed)
///
/// Seed rows use `ON CONFLICT DO NOTHING`, so reruns are harmless.
pub async fn run_migrations(pool: &DatabasePool) -> Result<(), DatabaseError> {
    let migrator = sqlx::migrate!("../../migrations");
    info!(migrations = migrator.iter().count(), "Applying migrations");
    migrator
        .run(pool)
        .await
        .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_small() {
        let config = DatabaseConfig::new("postgres://localhost/swasthyasetu");
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.min_connections, 1);
        assert_eq!(config.application_name, DEFAULT_APPLICATION_NAME);
    }

    #[test]
    fn test_min_never_exceeds_max() {
        let config = DatabaseConfig::new("postgres://test").max_connections(2).min_connections(10);
        assert_eq!(config.min_connections, 2);
    }

    #[test]
    fn test_connect_options_carry_application_name() {
        let options = DatabaseConfig::new("postgres://user:pw@db.internal:6543/claims")
            .application_name("claims-worker")
            .connect_options()
            .unwrap();
        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 6543);
        assert_eq!(options.get_application_name(), Some("claims-worker"));
    }

    #[test]
    fn test_malformed_url_is_connection_error() {
        let err = DatabaseConfig::new("not a url").connect_options().unwrap_err();
        assert!(matches!(err, DatabaseError::ConnectionFailed(_)));
    }
}
