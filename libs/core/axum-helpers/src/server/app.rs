use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::not_found;
use axum::{Json, Router, routing::get};
use core_config::server::ServerConfig;
use std::future::Future;
use std::io;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;

/// Path the generated OpenAPI document is served from
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Creates the application router around the given API routes.
///
/// This function sets up:
/// - The OpenAPI JSON document of `T` at [`OPENAPI_PATH`]
/// - The API routes, merged at the root
/// - Request/response tracing
/// - The plain-text 404 fallback
///
/// Health endpoints (`/health`, `/ready`) are added by the app itself using
/// [`health_router`](super::health::health_router) and its own ready handler.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use utoipa::OpenApi;
/// use axum_helpers::server::create_router;
///
/// #[derive(OpenApi)]
/// #[openapi(paths(/* your paths */))]
/// struct ApiDoc;
///
/// let api_routes = Router::new()
///     .route("/example", get(handler))
///     .with_state(my_state);
///
/// let router = create_router::<ApiDoc>(api_routes);
/// ```
pub fn create_router<T>(apis: Router) -> Router
where
    T: OpenApi + 'static,
{
    let doc = T::openapi();

    Router::new()
        .route(
            OPENAPI_PATH,
            get(move || {
                let doc = doc.clone();
                async move { Json(doc) }
            }),
        )
        .merge(apis)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

/// Serve `router` until SIGINT/SIGTERM, then run `cleanup`.
///
/// `cleanup` (closing the database pool, for example) starts only after axum's
/// graceful shutdown has drained every in-flight request, and is bounded by
/// `shutdown_timeout`.
///
/// # Example
/// ```ignore
/// let cleanup = async move {
///     db.close().await.ok();
/// };
///
/// create_production_app(router, &config, Duration::from_secs(30), cleanup).await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let coordinator = ShutdownCoordinator::new();
    let signal_handle = coordinator.clone();

    let listener = TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let result = serve_then_cleanup(
        listener,
        router,
        async move { signal_handle.wait_for_signal().await },
        shutdown_timeout,
        cleanup,
    )
    .await;

    if !coordinator.is_shutting_down() {
        tracing::warn!("Server stopped without a shutdown signal");
    }
    result
}

/// Serve until `shutdown_signal` resolves and the open connections finish,
/// then run `cleanup` under `shutdown_timeout`.
async fn serve_then_cleanup<S, F>(
    listener: TcpListener,
    router: Router,
    shutdown_signal: S,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    S: Future<Output = ()> + Send + 'static,
    F: Future<Output = ()> + Send,
{
    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal)
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
    match tokio::time::timeout(shutdown_timeout, cleanup).await {
        Ok(()) => info!("Cleanup completed successfully"),
        Err(_) => tracing::warn!(
            "Cleanup exceeded timeout of {:?}, forcing shutdown",
            shutdown_timeout
        ),
    }

    serve_result
}
