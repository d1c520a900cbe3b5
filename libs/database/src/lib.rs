//! Database library providing the SQLite connector and shared utilities
//!
//! Connections are SeaORM [`DatabaseConnection`](sea_orm::DatabaseConnection)
//! pools backed by sqlx's SQLite driver, so domain crates can build entities
//! and repositories on top of them without caring how the pool was opened.
//!
//! # Features
//!
//! - `config` - Configuration support with `core_config::FromEnv`
//!
//! # Examples
//!
//! ```ignore
//! use database::sqlite::{self, SqliteConfig};
//!
//! // File-backed store, created on first use
//! let db = sqlite::connect("sqlite://database.sqlite?mode=rwc").await?;
//!
//! // In-memory store (single pooled connection)
//! let db = sqlite::connect_from_config(SqliteConfig::in_memory()).await?;
//! sqlite::check_health(&db).await?;
//! ```

pub mod common;
pub mod sqlite;

pub use common::{DatabaseError, DatabaseResult};
