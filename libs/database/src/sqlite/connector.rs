use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::info;

use super::SqliteConfig;
use crate::common::{RetryConfig, retry, retry_with_backoff};

/// Connect to a SQLite database with default pool settings
///
/// # Example
/// ```ignore
/// use database::sqlite::connect;
///
/// let db = connect("sqlite://database.sqlite?mode=rwc").await?;
/// ```
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    connect_from_config(SqliteConfig::new(database_url)).await
}

/// Connect using a SqliteConfig
///
/// This is the recommended way to connect when using configuration.
pub async fn connect_from_config(config: SqliteConfig) -> Result<DatabaseConnection, DbErr> {
    let in_memory = config.is_in_memory();
    let db = connect_with_options(config.into_connect_options()).await?;

    if in_memory {
        info!("Connected to in-memory SQLite database");
    } else {
        info!("Connected to SQLite database");
    }

    Ok(db)
}

/// Connect with custom connection options
pub async fn connect_with_options(options: ConnectOptions) -> Result<DatabaseConnection, DbErr> {
    Database::connect(options).await
}

/// Connect from config, retrying with exponential backoff on failure
///
/// A locked or briefly unavailable store file at startup should not take the
/// service down.
///
/// # Example
/// ```ignore
/// use database::common::RetryConfig;
/// use database::sqlite::{SqliteConfig, connect_from_config_with_retry};
///
/// let retry_config = RetryConfig::new().with_max_retries(5);
/// let db = connect_from_config_with_retry(SqliteConfig::default(), Some(retry_config)).await?;
/// ```
pub async fn connect_from_config_with_retry(
    config: SqliteConfig,
    retry_config: Option<RetryConfig>,
) -> Result<DatabaseConnection, DbErr> {
    let attempt = || connect_from_config(config.clone());

    match retry_config {
        Some(policy) => retry_with_backoff(attempt, policy).await,
        None => retry(attempt).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::check_health;

    #[tokio::test]
    async fn test_connect_in_memory() {
        let db = connect("sqlite::memory:").await.unwrap();
        assert!(check_health(&db).await.is_ok());
    }

    #[tokio::test]
    async fn test_connect_with_retry_in_memory() {
        let policy = RetryConfig::new().with_max_retries(1).with_initial_delay(1);
        let db = connect_from_config_with_retry(SqliteConfig::in_memory(), Some(policy))
            .await
            .unwrap();
        assert!(check_health(&db).await.is_ok());
    }

    #[tokio::test]
    async fn test_connect_rejects_unopenable_path() {
        let policy = RetryConfig::new()
            .with_max_retries(1)
            .with_initial_delay(1)
            .without_jitter();
        let config = SqliteConfig::new("sqlite:///nonexistent-dir/for/sure/items.sqlite?mode=ro");

        let result = connect_from_config_with_retry(config, Some(policy)).await;
        assert!(result.is_err());
    }
}
