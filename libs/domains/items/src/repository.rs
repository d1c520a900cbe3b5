use async_trait::async_trait;

use crate::error::ItemResult;
use crate::models::{Item, ItemFilter, NewItem, PageRequest};

/// Repository trait for Item persistence
///
/// A unique-constraint rejection from the store is reported as
/// `ItemError::DuplicateName` by `create` and `ItemError::NameTaken` by
/// `update`, the same errors the service's own name checks produce.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Insert a new item; the store assigns the id and both timestamps
    async fn create(&self, input: NewItem) -> ItemResult<Item>;

    async fn get_by_id(&self, id: i64) -> ItemResult<Option<Item>>;

    /// Exact, case-sensitive name lookup
    async fn get_by_name(&self, name: &str) -> ItemResult<Option<Item>>;

    /// One page of items matching `filter`, ascending by id
    async fn list(&self, filter: ItemFilter, page: PageRequest) -> ItemResult<Vec<Item>>;

    /// Count items matching `filter`
    async fn count(&self, filter: ItemFilter) -> ItemResult<u64>;

    /// Overwrite name and description and refresh `updatedAt`.
    /// Returns `false` when no row has that id.
    async fn update(&self, id: i64, input: NewItem) -> ItemResult<bool>;

    /// Returns `false` when no row has that id
    async fn delete(&self, id: i64) -> ItemResult<bool>;
}
