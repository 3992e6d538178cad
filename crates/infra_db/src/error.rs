//! Database error types

use thiserror::Error;

use core_kernel::PortError;

/// Errors from the pool, migrations and repositories
///
/// Repositories return `Sql` as raised; [`DatabaseError::classify`] narrows it
/// by SQLSTATE where the caller cares (the audit insert does).
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// SQLSTATE 23505
    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    /// SQLSTATE 23503 or 23514
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// A stored value does not fit the domain type, e.g. a negative waiting period
    #[error("Invalid stored value: {0}")]
    InvalidStoredValue(String),

    #[error("No database connection available")]
    PoolExhausted,

    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),
}

impl DatabaseError {
    pub fn classify(self) -> Self {
        let DatabaseError::Sql(error) = self else {
            return self;
        };
        let narrowed = match &error {
            sqlx::Error::PoolTimedOut => Some(DatabaseError::PoolExhausted),
            sqlx::Error::Io(e) => Some(DatabaseError::ConnectionFailed(e.to_string())),
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                Some(DatabaseError::InvalidStoredValue(error.to_string()))
            }
            sqlx::Error::Database(db) => {
                let message = db.message().to_string();
                match db.code().as_deref() {
                    Some("23505") => Some(DatabaseError::DuplicateEntry(message)),
                    Some("23503") | Some("23514") => Some(DatabaseError::ConstraintViolation(message)),
                    _ => None,
                }
            }
            _ => None,
        };
        narrowed.unwrap_or(DatabaseError::Sql(error))
    }

    pub fn is_connection_error(&self) -> bool {
        matches!(self, DatabaseError::ConnectionFailed(_) | DatabaseError::PoolExhausted)
    }
}

impl From<DatabaseError> for PortError {
    fn from(e: DatabaseError) -> Self {
        match e.classify() {
            DatabaseError::ConnectionFailed(msg) => PortError::connection(msg),
            DatabaseError::PoolExhausted => PortError::unavailable("postgres"),
            DatabaseError::InvalidStoredValue(msg) => PortError::transformation(msg),
            other => PortError::internal(other.to_string()),
        }
    }
}
