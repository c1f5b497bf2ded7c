//! Application state management.

use database::postgres::DatabaseConnection;

/// Shared application state.
///
/// Cloning is cheap: the connection is a handle to a shared pool.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL database connection pool
    pub db: DatabaseConnection,
}
