//! Disposable PostgreSQL for adapter tests
//!
//! Each [`TestDatabase`] owns a `postgres:16-alpine` container with the
//! schema and reference catalog from `migrations/` already applied. The
//! shared instance is read-only by convention; tests that write start their
//! own.

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use testcontainers::{
    core::{IntoContainerPort, WaitFor},
    runners::AsyncRunner,
    ContainerAsync, GenericImage, ImageExt,
};
use tokio::sync::OnceCell;

type SetupError = Box<dyn std::error::Error + Send + Sync>;

const IMAGE: (&str, &str) = ("postgres", "16-alpine");
const CREDENTIALS: (&str, &str) = ("swasthya", "swasthya");
const DATABASE: &str = "swasthyasetu_test";
const READY_LINE: &str = "database system is ready to accept connections";

/// Tables the tests write to; the catalogs are seed data and stay
const WRITTEN_TABLES: &[&str] = &["audit_log"];

pub struct TestDatabase {
    _container: ContainerAsync<GenericImage>,
    pub url: String,
    pool: PgPool,
}

impl TestDatabase {
    /// Starts a fresh container and applies the migration script
    pub async fn start() -> Result<Self, SetupError> {
        let (user, password) = CREDENTIALS;
        let container = GenericImage::new(IMAGE.0, IMAGE.1)
            .with_exposed_port(5432.tcp())
            .with_wait_for(WaitFor::message_on_stderr(READY_LINE))
            .with_env_var("POSTGRES_USER", user)
            .with_env_var("POSTGRES_PASSWORD", password)
            .with_env_var("POSTGRES_DB", DATABASE)
            .start()
            .await?;

        let url = format!(
            "postgres://{}:{}@{}:{}/{}",
            user,
            password,
            container.get_host().await?,
            container.get_host_port_ipv4(5432).await?,
            DATABASE
        );
        let pool = PgPoolOptions::new()
            .max_connections(4)
            .acquire_timeout(Duration::from_secs(30))
            .connect(&url)
            .await?;

        sqlx::raw_sql(include_str!("../../../migrations/0001_init.sql"))
            .execute(&pool)
            .await?;

        Ok(Self { _container: container, url, pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Empties the written tables, keeping the seeded catalogs
    pub async fn clear_data(&self) -> Result<(), SetupError> {
        for table in WRITTEN_TABLES {
            sqlx::query(&format!("TRUNCATE TABLE {}", table))
                .execute(&self.pool)
                .await?;
        }
        Ok(())
    }

    pub async fn count_rows(&self, table: &str) -> Result<i64, SetupError> {
        let count = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

static SHARED: OnceCell<Arc<TestDatabase>> = OnceCell::const_new();

/// Container shared by the read-only catalog and herb tests
///
/// # Panics
///
/// If Docker is unavailable or the container never becomes ready.
pub async fn get_shared_test_database() -> Arc<TestDatabase> {
    SHARED
        .get_or_init(|| async {
            let db = TestDatabase::start().await.expect("shared PostgreSQL container");
            Arc::new(db)
        })
        .await
        .clone()
}
