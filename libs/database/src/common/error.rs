/// Errors raised while establishing or probing the database connection
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// Driver-level failure (SeaORM)
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sea_orm::DbErr),

    /// The pool opened but the initial ping did not succeed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Health check failed
    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
