//! Connection cleanup run during graceful shutdown.

use sea_orm::DatabaseConnection;
use tracing::{error, info};

/// Close a SeaORM connection pool, logging the outcome.
///
/// The pool would close on drop as well; closing it explicitly lets a SQLite
/// file store flush and release its lock before the process exits.
///
/// # Example
/// ```ignore
/// use axum_helpers::server::close_database;
///
/// close_database(db, "items").await;
/// ```
pub async fn close_database(db: DatabaseConnection, name: &str) {
    match db.close().await {
        Ok(_) => info!("Database connection '{}' closed successfully", name),
        Err(e) => error!("Error closing database connection '{}': {}", name, e),
    }
}
