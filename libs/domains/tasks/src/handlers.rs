use axum::{
    Router,
    extract::{Path, State, rejection::PathRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use axum_helpers::{LenientJson, LenientJsonRejection};
use serde::Serialize;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{TaskError, TaskResult};
use crate::models::{Task, TaskStatus};
use crate::service::TaskService;

/// Mount point of [`router`] in the application
pub const TASKS_PATH: &str = "/tasks";

/// OpenAPI documentation for the Tasks API, relative to [`TASKS_PATH`]
#[derive(OpenApi)]
#[openapi(
    paths(list_tasks, get_task, create_task, update_task, delete_task),
    components(schemas(Task, TaskStatus)),
    tags(
        (name = "tasks", description = "Task CRUD operations")
    )
)]
pub struct TasksApiDoc;

/// Create the task routes, to be nested under [`TASKS_PATH`]
pub fn router<S: TaskService + 'static>(service: S) -> Router {
    Router::new()
        .route("/", get(list_tasks::<S>).post(create_task::<S>))
        .route(
            "/{id}",
            get(get_task::<S>)
                .put(update_task::<S>)
                .delete(delete_task::<S>),
        )
        .with_state(Arc::new(service))
}

/// Parse the `{id}` path segment.
///
/// Signs are accepted so negative ids reach the service and fail there.
pub fn parse_task_id(raw: &str) -> TaskResult<i64> {
    if raw.is_empty() {
        return Err(TaskError::EmptyId);
    }
    raw.parse::<i64>().map_err(|_| TaskError::InvalidId)
}

/// Extract and parse the `{id}` path segment; an undecodable segment is an invalid id
fn task_id(path: Result<Path<String>, PathRejection>) -> TaskResult<i64> {
    let Path(raw) = path.map_err(|_| TaskError::InvalidId)?;
    parse_task_id(&raw)
}

/// 200 with a newline-terminated JSON body
fn json_response<T: Serialize>(value: &T) -> TaskResult<Response> {
    let mut body = serde_json::to_vec(value).map_err(|_| TaskError::FailedEncode)?;
    body.push(b'\n');

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response())
}

/// List all tasks
#[utoipa::path(
    get,
    path = "",
    tag = "tasks",
    responses(
        (status = 200, description = "All tasks, possibly empty", body = Vec<Task>),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn list_tasks<S: TaskService>(State(service): State<Arc<S>>) -> TaskResult<Response> {
    let tasks = service.list_tasks().await?;
    json_response(&tasks)
}

/// Get a task by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "tasks",
    params(
        ("id" = i64, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task found", body = Task),
        (status = 400, description = "Empty, non-numeric or negative id"),
        (status = 404, description = "Task not found"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn get_task<S: TaskService>(
    State(service): State<Arc<S>>,
    path: Result<Path<String>, PathRejection>,
) -> TaskResult<Response> {
    let id = task_id(path)?;
    let task = service.get_task(id).await?;
    json_response(&task)
}

/// Create a new task
///
/// The body's `id` and timestamps are ignored. The new row is addressed by
/// the `Location` header; the body is empty.
#[utoipa::path(
    post,
    path = "",
    tag = "tasks",
    request_body = Task,
    responses(
        (status = 201, description = "Task created", headers(
            ("location" = String, description = "Path of the created task")
        )),
        (status = 400, description = "Undecodable payload or invalid fields"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn create_task<S: TaskService>(
    State(service): State<Arc<S>>,
    payload: Result<LenientJson<Task>, LenientJsonRejection>,
) -> TaskResult<impl IntoResponse> {
    let LenientJson(task) = payload.map_err(|_| TaskError::InvalidPayload)?;

    let created = service.create_task(task).await?;
    let location = format!("{}/{}", TASKS_PATH, created.id);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)]))
}

/// Replace a task's title, description and status
///
/// The path id wins over any `id` in the body. Missing ids are not reported.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "tasks",
    params(
        ("id" = i64, Path, description = "Task ID")
    ),
    request_body = Task,
    responses(
        (status = 200, description = "Task updated"),
        (status = 400, description = "Undecodable payload, invalid fields or invalid id"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn update_task<S: TaskService>(
    State(service): State<Arc<S>>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<LenientJson<Task>, LenientJsonRejection>,
) -> TaskResult<StatusCode> {
    let LenientJson(mut task) = payload.map_err(|_| TaskError::InvalidPayload)?;
    task.id = task_id(path)?;

    service.update_task(task).await?;
    Ok(StatusCode::OK)
}

/// Delete a task
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "tasks",
    params(
        ("id" = i64, Path, description = "Task ID")
    ),
    responses(
        (status = 204, description = "Task deleted, or never existed"),
        (status = 400, description = "Empty, non-numeric or negative id"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn delete_task<S: TaskService>(
    State(service): State<Arc<S>>,
    path: Result<Path<String>, PathRejection>,
) -> TaskResult<StatusCode> {
    let id = task_id(path)?;
    service.delete_task(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::MockTaskService;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use mockall::predicate::eq;
    use sea_orm::DbErr;
    use tower::ServiceExt;

    fn app(service: MockTaskService) -> Router {
        Router::new().nest(TASKS_PATH, router(service))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn storage_fault() -> TaskError {
        DbErr::Custom("database is unreachable".to_string()).into()
    }

    #[test]
    fn test_parse_task_id() {
        assert!(matches!(parse_task_id(""), Err(TaskError::EmptyId)));
        assert!(matches!(parse_task_id("abc"), Err(TaskError::InvalidId)));
        assert!(matches!(parse_task_id("1.5"), Err(TaskError::InvalidId)));
        assert_eq!(parse_task_id("12").unwrap(), 12);
        assert_eq!(parse_task_id("-3").unwrap(), -3);
    }

    #[tokio::test]
    async fn test_create_sets_location_and_empty_body() {
        let mut service = MockTaskService::new();
        service.expect_create_task().returning(|mut task| {
            task.id = 8;
            Ok(task)
        });

        let response = app(service)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/tasks")
                    .body(Body::from(r#"{"title":"a","status":"Pending"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/tasks/8");
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_create_undecodable_payload() {
        let mut service = MockTaskService::new();
        service.expect_create_task().never();

        let (status, body) = send(
            app(service),
            Request::builder()
                .method("POST")
                .uri("/tasks")
                .body(Body::from("[not, a, task"))
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "invalid request payload\n");
    }

    #[tokio::test]
    async fn test_get_renders_json_with_trailing_newline() {
        let mut service = MockTaskService::new();
        service.expect_get_task().with(eq(3)).returning(|id| {
            let mut task = Task::new("Read", "", "InProgress");
            task.id = id;
            Ok(task)
        });

        let response = app(service)
            .oneshot(Request::builder().uri("/tasks/3").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.ends_with(b"}\n"));
        let task: Task = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(task.id, 3);
        assert_eq!(task.status, "InProgress");
    }

    #[tokio::test]
    async fn test_get_non_numeric_id() {
        let mut service = MockTaskService::new();
        service.expect_get_task().never();

        let (status, body) = send(
            app(service),
            Request::builder().uri("/tasks/abc").body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "the id is invalid\n");
    }

    #[tokio::test]
    async fn test_non_utf8_id_segment_is_invalid_id() {
        let mut service = MockTaskService::new();
        service.expect_get_task().never();
        service.expect_update_task().never();
        service.expect_delete_task().never();
        let app = app(service);

        for method in ["GET", "PUT", "DELETE"] {
            let body = if method == "PUT" {
                Body::from(r#"{"title":"t","status":"Pending"}"#)
            } else {
                Body::empty()
            };
            let (status, text) = send(
                app.clone(),
                Request::builder()
                    .method(method)
                    .uri("/tasks/%FF")
                    .body(body)
                    .unwrap(),
            )
            .await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "{method}");
            assert_eq!(text, "the id is invalid\n", "{method}");
        }
    }

    #[tokio::test]
    async fn test_create_ignores_data_after_first_json_value() {
        let mut service = MockTaskService::new();
        service
            .expect_create_task()
            .withf(|task| task.title == "a" && task.status == "Pending")
            .times(1)
            .returning(|mut task| {
                task.id = 1;
                Ok(task)
            });

        let (status, _) = send(
            app(service),
            Request::builder()
                .method("POST")
                .uri("/tasks")
                .body(Body::from("{\"title\":\"a\",\"status\":\"Pending\"}\n{}"))
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_get_maps_service_errors() {
        let mut service = MockTaskService::new();
        service
            .expect_get_task()
            .with(eq(-1))
            .returning(|_| Err(TaskError::InvalidId));
        service
            .expect_get_task()
            .with(eq(10))
            .returning(|_| Err(TaskError::NotFound));
        service
            .expect_get_task()
            .with(eq(11))
            .returning(|_| Err(storage_fault()));
        let app = app(service);

        let get = |uri: &'static str| Request::builder().uri(uri).body(Body::empty()).unwrap();

        let (status, body) = send(app.clone(), get("/tasks/-1")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "the id is invalid\n");

        let (status, body) = send(app.clone(), get("/tasks/10")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "task not found\n");

        let (status, body) = send(app, get("/tasks/11")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains("database is unreachable"));
    }

    #[tokio::test]
    async fn test_update_uses_path_id() {
        let mut service = MockTaskService::new();
        service
            .expect_update_task()
            .withf(|task| task.id == 5 && task.title == "renamed")
            .times(1)
            .returning(|_| Ok(()));

        let (status, body) = send(
            app(service),
            Request::builder()
                .method("PUT")
                .uri("/tasks/5")
                .body(Body::from(
                    r#"{"id":99,"title":"renamed","status":"Completed"}"#,
                ))
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_update_validation_error_is_bad_request() {
        let mut service = MockTaskService::new();
        service
            .expect_update_task()
            .returning(|_| Err(TaskError::EmptyStatus));

        let (status, body) = send(
            app(service),
            Request::builder()
                .method("PUT")
                .uri("/tasks/5")
                .body(Body::from(r#"{"title":"t"}"#))
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "status cannot be empty\n");
    }

    #[tokio::test]
    async fn test_delete_returns_no_content() {
        let mut service = MockTaskService::new();
        service
            .expect_delete_task()
            .with(eq(999_999))
            .returning(|_| Ok(()));

        let (status, body) = send(
            app(service),
            Request::builder()
                .method("DELETE")
                .uri("/tasks/999999")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_list_empty_is_json_array() {
        let mut service = MockTaskService::new();
        service.expect_list_tasks().returning(|| Ok(Vec::new()));

        let (status, body) = send(
            app(service),
            Request::builder().uri("/tasks").body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "[]\n");
    }

    #[tokio::test]
    async fn test_list_storage_fault() {
        let mut service = MockTaskService::new();
        service
            .expect_list_tasks()
            .returning(|| Err(storage_fault()));

        let (status, _) = send(
            app(service),
            Request::builder().uri("/tasks").body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_openapi_lists_task_routes() {
        let doc = TasksApiDoc::openapi();
        assert_eq!(doc.paths.paths.len(), 2);
        assert!(doc.paths.paths.contains_key("/{id}"));
    }
}
