//! Items API - REST server over a SQLite item store

use axum_helpers::server::{close_database, create_production_app};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::common::RetryConfig;
use database::sqlite::connect_from_config_with_retry;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to SQLite at {}", config.database.url());

    let db = connect_from_config_with_retry(
        config.database.clone(),
        Some(RetryConfig::new().with_max_retries(5)),
    )
    .await?;

    let state = AppState {
        config: config.clone(),
        db,
    };

    // Create the items table on first start
    api::init_schema(&state).await?;

    let app = api::app(&state)?;

    info!(
        "Starting {} v{} on port {}",
        config.app.name, config.app.version, config.server.port
    );

    let db = state.db.clone();
    create_production_app(
        app,
        &config.server,
        config.shutdown_timeout,
        async move {
            info!("Shutting down: closing SQLite connections");
            close_database(db, "items").await;
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Items API shutdown complete");
    Ok(())
}
