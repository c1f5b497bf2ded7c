//! PostgreSQL connection bootstrap for the task service
//!
//! Provides environment-driven pool configuration, a connect-and-ping entry
//! point and the readiness health check. Repositories receive the resulting
//! [`postgres::DatabaseConnection`] through their constructors.
//!
//! # Example
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::postgres::{self, PostgresConfig};
//!
//! let config = PostgresConfig::from_env()?;
//! let db = postgres::connect_from_config(config).await?;
//! postgres::check_health(&db).await?;
//! ```

pub mod common;
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult};
