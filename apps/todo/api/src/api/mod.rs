use axum::{Router, routing::get};
use axum_helpers::server::{create_router, health_router};
use domain_tasks::handlers::TASKS_PATH;

use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod health;
pub mod tasks;

/// Creates the API routes. Sub-routers have their state applied already.
pub fn routes(state: &AppState) -> Router {
    Router::new().nest(TASKS_PATH, tasks::router(state))
}

/// Creates a router with the /ready endpoint that checks the database.
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}

/// The complete application: task routes, OpenAPI document, fallback,
/// tracing, plus the liveness and readiness probes.
pub fn app(state: &AppState) -> Router {
    create_router::<ApiDoc>(routes(state))
        .merge(health_router(state.config.app))
        .merge(ready_router(state.clone()))
}
