use async_trait::async_trait;
use axum_helpers::ErrorCode;
use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr,
};
use tracing::instrument;

use crate::{
    entity,
    error::{ItemError, ItemResult},
    models::{Item, ItemFilter, NewItem, PageRequest},
    repository::ItemRepository,
};

/// Table definition, applied at startup when the table is missing.
pub const CREATE_ITEMS_TABLE: &str = "\
CREATE TABLE IF NOT EXISTS items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT UNIQUE NOT NULL,
    description TEXT DEFAULT '',
    createdAt TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updatedAt TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
)";

/// SQLite binds integers as i64.
const MAX_BIND: u64 = i64::MAX as u64;

pub struct SqliteItemRepository {
    db: DatabaseConnection,
}

impl SqliteItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create the items table if it does not exist yet
    pub async fn init_schema(&self) -> ItemResult<()> {
        self.db.execute_unprepared(CREATE_ITEMS_TABLE).await?;
        tracing::info!("Items table ready");
        Ok(())
    }
}

fn filter_condition(filter: &ItemFilter) -> Condition {
    let mut condition = Condition::all();

    if let Some(name) = &filter.name {
        condition = condition.add(entity::Column::Name.contains(name));
    }

    if let Some(description) = &filter.description {
        condition = condition.add(entity::Column::Description.contains(description));
    }

    condition
}

/// Map a unique-constraint rejection to `conflict`, anything else to a
/// database error.
fn unique_violation_or_db(err: DbErr, conflict: ItemError) -> ItemError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::info!(
                error_code = ErrorCode::DatabaseUniqueViolation.code(),
                "Unique constraint rejected write: {}",
                detail
            );
            conflict
        }
        _ => err.into(),
    }
}

#[async_trait]
impl ItemRepository for SqliteItemRepository {
    #[instrument(skip(self, input), fields(item_name = %input.name))]
    async fn create(&self, input: NewItem) -> ItemResult<Item> {
        let now = Utc::now();
        let active_model = entity::ActiveModel {
            id: NotSet,
            name: Set(input.name),
            description: Set(Some(input.description)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| unique_violation_or_db(e, ItemError::DuplicateName))?;

        tracing::info!(item_id = model.id, "Created item");
        Ok(model.into())
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: i64) -> ItemResult<Option<Item>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    #[instrument(skip(self))]
    async fn get_by_name(&self, name: &str) -> ItemResult<Option<Item>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Name.eq(name))
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: ItemFilter, page: PageRequest) -> ItemResult<Vec<Item>> {
        let models = entity::Entity::find()
            .filter(filter_condition(&filter))
            .order_by_asc(entity::Column::Id)
            .limit(page.limit.min(MAX_BIND))
            .offset(page.offset().min(MAX_BIND))
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: ItemFilter) -> ItemResult<u64> {
        let total = entity::Entity::find()
            .filter(filter_condition(&filter))
            .count(&self.db)
            .await?;
        Ok(total)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: i64, input: NewItem) -> ItemResult<bool> {
        let result = entity::Entity::update_many()
            .col_expr(entity::Column::Name, Expr::value(input.name))
            .col_expr(entity::Column::Description, Expr::value(input.description))
            .col_expr(entity::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| unique_violation_or_db(e, ItemError::NameTaken))?;

        if result.rows_affected > 0 {
            tracing::info!(item_id = id, "Updated item");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> ItemResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(item_id = id, "Deleted item");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
