//! Configuration for Items API

use core_config::{app_info, env_parse, server::ServerConfig, AppInfo, FromEnv};
use database::sqlite::SqliteConfig;
use std::time::Duration;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: SqliteConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Budget for closing the store after the server stops
    pub shutdown_timeout: Duration,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = SqliteConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let shutdown_timeout_secs: u64 = env_parse("SHUTDOWN_TIMEOUT_SECS", "30")?;

        Ok(Self {
            app: app_info!(),
            database,
            server,
            environment,
            shutdown_timeout: Duration::from_secs(shutdown_timeout_secs),
        })
    }
}
