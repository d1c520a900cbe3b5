//! Items API routes

use axum::Router;
use domain_items::{handlers, ItemService, SqliteItemRepository};

use crate::state::AppState;

/// Create items router
pub fn router(state: &AppState) -> Router {
    let repository = SqliteItemRepository::new(state.db.clone());
    let service = ItemService::new(repository);
    handlers::router(service)
}

/// Create the items table if it is missing
pub async fn init_schema(state: &AppState) -> eyre::Result<()> {
    let repository = SqliteItemRepository::new(state.db.clone());
    repository.init_schema().await?;
    Ok(())
}
