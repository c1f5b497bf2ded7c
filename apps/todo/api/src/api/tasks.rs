use axum::Router;
use domain_tasks::{DefaultTaskService, PgTaskRepository, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgTaskRepository::new(state.db.clone());
    let service = DefaultTaskService::new(repository);
    handlers::router(service)
}
