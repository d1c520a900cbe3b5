use sea_orm::DatabaseConnection;
use tracing::debug;

use crate::common::{DatabaseError, DatabaseResult};

/// Check that the SQLite store answers.
///
/// Used by the readiness endpoint.
///
/// # Example
/// ```ignore
/// use database::sqlite::{connect, check_health};
///
/// let db = connect("sqlite::memory:").await?;
/// check_health(&db).await?;
/// ```
pub async fn check_health(db: &DatabaseConnection) -> DatabaseResult<()> {
    debug!("Running SQLite health check");

    db.ping()
        .await
        .map_err(|e| DatabaseError::HealthCheckFailed(format!("SQLite ping failed: {}", e)))?;

    debug!("SQLite health check passed");
    Ok(())
}
