use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use super::PostgresConfig;
use crate::common::{DatabaseError, DatabaseResult};

/// Connect using a PostgresConfig and verify the pool with a ping.
///
/// The process should not start serving traffic against an unreachable
/// database, so a failed ping is reported as [`DatabaseError::ConnectionFailed`].
///
/// ```ignore
/// use core_config::FromEnv;
/// use database::postgres::{PostgresConfig, connect_from_config};
///
/// let config = PostgresConfig::from_env()?;
/// let db = connect_from_config(config).await?;
/// ```
pub async fn connect_from_config(config: PostgresConfig) -> DatabaseResult<DatabaseConnection> {
    let max_connections = config.max_connections;
    let options: ConnectOptions = config.into_connect_options();

    let db = Database::connect(options).await?;
    db.ping()
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    info!(max_connections, "Connected to PostgreSQL");
    Ok(db)
}
