use utoipa::OpenApi;

/// OpenAPI document served at `/api-docs/openapi.json`
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Todo API",
        description = "CRUD service for task records"
    ),
    nest(
        (path = "/tasks", api = domain_tasks::TasksApiDoc),
    )
)]
pub struct ApiDoc;
