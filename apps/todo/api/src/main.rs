use axum_helpers::server::create_production_app;
use core_config::tracing::{init_tracing, install_color_eyre};
use eyre::WrapErr;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Before any fallible operation so startup errors render with color-eyre
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    info!(
        name = config.app.name,
        version = config.app.version,
        "Starting todo API"
    );

    // Fail fast: an unreachable database aborts startup
    let db = database::postgres::connect_from_config(config.database.clone())
        .await
        .wrap_err("PostgreSQL connection failed")?;

    let server_config = config.server.clone();
    let state = AppState { config, db };
    let app = api::app(&state);

    info!("Serving with graceful shutdown (30s timeout)");

    // State moves here for cleanup
    create_production_app(
        app,
        &server_config,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing database connections");
            match state.db.close().await {
                Ok(()) => info!("PostgreSQL connection closed successfully"),
                Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
            }
        },
    )
    .await
    .wrap_err("Server error")?;

    info!("Todo API shutdown complete");
    Ok(())
}
