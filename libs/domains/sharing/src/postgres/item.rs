use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::{Expr, ExprTrait, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder,
};

use super::db_error;
use crate::entity::item::{ActiveModel, Column, Entity};
use crate::error::{SharingError, SharingResult};
use crate::models::{CreateItem, Item, UpdateItem};
use crate::repository::ItemRepository;

#[derive(Clone)]
pub struct PgItemRepository {
    db: DatabaseConnection,
}

impl PgItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// `%text%` with LIKE wildcards in `text` matched literally.
fn contains_pattern(text: &str) -> String {
    let escaped = text
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    async fn create(&self, owner_id: i64, input: CreateItem) -> SharingResult<Item> {
        let model = ActiveModel::for_owner(owner_id, input)
            .insert(&self.db)
            .await
            .map_err(db_error)?;

        tracing::info!(item_id = model.id, owner_id, "Created item");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i64) -> SharingResult<Option<Item>> {
        let model = Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(model.map(Into::into))
    }

    async fn update(&self, id: i64, input: UpdateItem) -> SharingResult<Item> {
        let model = Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .ok_or(SharingError::ItemNotFound(id))?;

        let mut active_model = model.into_active_model();
        if let Some(name) = input.name {
            active_model.name = Set(name);
        }
        if let Some(description) = input.description {
            active_model.description = Set(description);
        }
        if let Some(available) = input.available {
            active_model.available = Set(available);
        }

        let model = active_model.update(&self.db).await.map_err(db_error)?;

        tracing::info!(item_id = id, "Updated item");
        Ok(model.into())
    }

    async fn list_by_owner(&self, owner_id: i64) -> SharingResult<Vec<Item>> {
        let models = Entity::find()
            .filter(Column::OwnerId.eq(owner_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn list_by_ids(&self, ids: Vec<i64>) -> SharingResult<Vec<Item>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = Entity::find()
            .filter(Column::Id.is_in(ids))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn search(&self, text: &str) -> SharingResult<Vec<Item>> {
        let pattern = contains_pattern(text);
        let matches_text = Condition::any()
            .add(Expr::expr(Func::lower(Expr::col(Column::Name))).like(pattern.clone()))
            .add(Expr::expr(Func::lower(Expr::col(Column::Description))).like(pattern));

        let models = Entity::find()
            .filter(Column::Available.eq(true))
            .filter(matches_text)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn list_by_requests(&self, request_ids: Vec<i64>) -> SharingResult<Vec<Item>> {
        if request_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = Entity::find()
            .filter(Column::RequestId.is_in(request_ids))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("Drill"), "%drill%");
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
    }
}
