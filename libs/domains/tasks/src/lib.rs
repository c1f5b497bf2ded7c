//! Tasks Domain
//!
//! Create, read, update, delete and list task records stored in a single
//! `tasks` table.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP binding, status-code mapping
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business rules, validation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← SQL and row mapping (trait + implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Task entity, status enum
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum::Router;
//! use domain_tasks::{DefaultTaskService, PgTaskRepository, handlers};
//! use sea_orm::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("postgres://...").await?;
//!
//! let service = DefaultTaskService::new(PgTaskRepository::new(db));
//! let app: Router = Router::new().nest(handlers::TASKS_PATH, handlers::router(service));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{TaskError, TaskResult};
pub use handlers::TasksApiDoc;
pub use models::{Task, TaskStatus};
pub use postgres::PgTaskRepository;
pub use repository::{InMemoryTaskRepository, TaskRepository};
pub use service::{DefaultTaskService, TaskService};
