use sea_orm::ConnectOptions;
use std::time::Duration;
use tracing::log::LevelFilter;

#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_or_default, env_parse};

/// SQLite store configuration
///
/// Holds the store location plus the pool settings SeaORM hands to sqlx.
///
/// # Example
///
/// ```ignore
/// use database::sqlite::SqliteConfig;
///
/// // File next to the service, created if missing
/// let config = SqliteConfig::default();
///
/// // In-memory store for tests
/// let config = SqliteConfig::in_memory();
///
/// // From environment variables (requires `config` feature)
/// let config = SqliteConfig::from_env()?;
/// ```
#[derive(Clone, Debug)]
pub struct SqliteConfig {
    /// sqlx SQLite URL, e.g. `sqlite://database.sqlite?mode=rwc` or `sqlite::memory:`
    pub url: String,

    /// Maximum number of pooled connections (ignored for in-memory stores)
    pub max_connections: u32,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Connection acquire timeout in seconds
    pub acquire_timeout_secs: u64,

    /// Enable SQL statement logging
    pub sqlx_logging: bool,

    /// SQL logging level
    pub sqlx_logging_level: LevelFilter,
}

impl SqliteConfig {
    /// Store file alongside the service, created on first connect.
    pub const DEFAULT_URL: &'static str = "sqlite://database.sqlite?mode=rwc";

    /// Private in-memory store.
    pub const MEMORY_URL: &'static str = "sqlite::memory:";

    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 5,
            connect_timeout_secs: 8,
            acquire_timeout_secs: 8,
            sqlx_logging: false,
            sqlx_logging_level: LevelFilter::Debug,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Self::MEMORY_URL)
    }

    /// Whether the URL names an in-memory database.
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }

    /// Convert this config into SeaORM ConnectOptions
    ///
    /// An in-memory database lives only as long as its connection, so the pool
    /// is pinned to exactly one connection that is never reaped.
    pub fn into_connect_options(self) -> ConnectOptions {
        let in_memory = self.is_in_memory();

        let mut opt = ConnectOptions::new(self.url);
        opt.connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
            .sqlx_logging(self.sqlx_logging)
            .sqlx_logging_level(self.sqlx_logging_level);

        if in_memory {
            let forever = Duration::from_secs(60 * 60 * 24 * 365);
            opt.max_connections(1)
                .min_connections(1)
                .idle_timeout(forever)
                .max_lifetime(forever);
        } else {
            opt.max_connections(self.max_connections.max(1));
        }

        opt
    }

    /// Get a reference to the database URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_URL)
    }
}

/// Load SqliteConfig from environment variables
///
/// Environment variables:
/// - `DATABASE_URL` (optional, default: `sqlite://database.sqlite?mode=rwc`)
/// - `DB_MAX_CONNECTIONS` (optional, default: 5)
/// - `DB_CONNECT_TIMEOUT_SECS` (optional, default: 8)
/// - `DB_ACQUIRE_TIMEOUT_SECS` (optional, default: 8)
/// - `DB_SQLX_LOGGING` (optional, default: false)
#[cfg(feature = "config")]
impl FromEnv for SqliteConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env_or_default("DATABASE_URL", Self::DEFAULT_URL),
            max_connections: env_parse("DB_MAX_CONNECTIONS", "5")?,
            connect_timeout_secs: env_parse("DB_CONNECT_TIMEOUT_SECS", "8")?,
            acquire_timeout_secs: env_parse("DB_ACQUIRE_TIMEOUT_SECS", "8")?,
            sqlx_logging: env_parse("DB_SQLX_LOGGING", "false")?,
            sqlx_logging_level: LevelFilter::Debug,
        })
    }
}
