//! Items Domain
//!
//! CRUD over a single `items` table in SQLite, with substring filtering,
//! pagination and unique item names.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, existence and name checks
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + SQLite implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Entity    │  ← SeaORM model of the items table
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_items::{handlers, ItemService, SqliteItemRepository};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = sea_orm::Database::connect("sqlite::memory:").await?;
//!
//! // Create the table if needed, then wire repository and service
//! let repository = SqliteItemRepository::new(db);
//! repository.init_schema().await?;
//! let service = ItemService::new(repository);
//!
//! // Mount under /items
//! let router = axum::Router::new().nest("/items", handlers::router(service));
//! # Ok(())
//! # }
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod sqlite;

// Re-export commonly used types
pub use error::{ItemError, ItemResult};
pub use handlers::ApiDoc;
pub use models::{
    CreateItem, CreatedItem, Item, ItemFilter, ItemPage, ListQuery, NewItem, PageRequest,
    UpdateItem,
};
pub use repository::ItemRepository;
pub use service::ItemService;
pub use sqlite::SqliteItemRepository;
