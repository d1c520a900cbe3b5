//! Item Service - Business logic layer

use axum_helpers::errors::validation_message;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ItemError, ItemResult};
use crate::models::{CreateItem, CreatedItem, Item, ItemPage, ListQuery, NewItem, UpdateItem};
use crate::repository::ItemRepository;

/// Item service providing business logic operations
///
/// Each operation runs its checks in a fixed order: body validation, then
/// existence, then name conflict, then the write itself.
pub struct ItemService<R: ItemRepository> {
    repository: Arc<R>,
}

impl<R: ItemRepository> ItemService<R> {
    /// Create a new ItemService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    fn validated<T>(input: T) -> ItemResult<NewItem>
    where
        T: Validate + TryInto<NewItem, Error = ItemError>,
    {
        input
            .validate()
            .map_err(|e| ItemError::Validation(validation_message(&e)))?;
        input.try_into()
    }

    /// Create a new item
    #[instrument(skip(self, input))]
    pub async fn create_item(&self, input: CreateItem) -> ItemResult<CreatedItem> {
        let new_item = Self::validated(input)?;

        if self.repository.get_by_name(&new_item.name).await?.is_some() {
            return Err(ItemError::DuplicateName);
        }

        let item = self.repository.create(new_item).await?;
        Ok(item.into())
    }

    /// Get an item by ID
    #[instrument(skip(self))]
    pub async fn get_item(&self, id: i64) -> ItemResult<Item> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ItemError::NotFound(id))
    }

    /// List one page of items matching the query's filters
    ///
    /// The page and the total are read with two statements; if either fails
    /// the whole call fails.
    #[instrument(skip(self))]
    pub async fn list_items(&self, query: ListQuery) -> ItemResult<ItemPage> {
        let filter = query.filter();
        let page = query.page_request();

        let data = self.repository.list(filter.clone(), page).await?;
        let total = self.repository.count(filter).await?;

        Ok(ItemPage {
            total,
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages(total),
            data,
        })
    }

    /// Replace an item's name and description
    #[instrument(skip(self, input))]
    pub async fn update_item(&self, id: i64, input: UpdateItem) -> ItemResult<()> {
        let new_item = Self::validated(input)?;

        if self.repository.get_by_id(id).await?.is_none() {
            return Err(ItemError::TargetNotFound(id));
        }

        // Keeping the current name is not a conflict
        if let Some(holder) = self.repository.get_by_name(&new_item.name).await? {
            if holder.id != id {
                return Err(ItemError::NameTaken);
            }
        }

        if !self.repository.update(id, new_item).await? {
            return Err(ItemError::TargetNotFound(id));
        }
        Ok(())
    }

    /// Delete an item
    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: i64) -> ItemResult<()> {
        if !self.repository.delete(id).await? {
            return Err(ItemError::TargetNotFound(id));
        }
        Ok(())
    }
}

impl<R: ItemRepository> Clone for ItemService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
