use async_trait::async_trait;
use chrono::NaiveDateTime;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use super::db_error;
use crate::entity::item_request::{ActiveModel, Column, Entity};
use crate::error::SharingResult;
use crate::models::{CreateItemRequest, ItemRequest, Page};
use crate::repository::ItemRequestRepository;

#[derive(Clone)]
pub struct PgItemRequestRepository {
    db: DatabaseConnection,
}

impl PgItemRequestRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ItemRequestRepository for PgItemRequestRepository {
    async fn create(
        &self,
        requestor_id: i64,
        input: CreateItemRequest,
        created: NaiveDateTime,
    ) -> SharingResult<ItemRequest> {
        let model = ActiveModel {
            description: Set(input.description),
            requestor_id: Set(requestor_id),
            created: Set(created),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(db_error)?;

        tracing::info!(request_id = model.id, requestor_id, "Created item request");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i64) -> SharingResult<Option<ItemRequest>> {
        let model = Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(model.map(Into::into))
    }

    async fn list_by_requestor(&self, requestor_id: i64) -> SharingResult<Vec<ItemRequest>> {
        let models = Entity::find()
            .filter(Column::RequestorId.eq(requestor_id))
            .order_by_desc(Column::Created)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn list_others(&self, user_id: i64, page: Page) -> SharingResult<Vec<ItemRequest>> {
        let models = Entity::find()
            .filter(Column::RequestorId.ne(user_id))
            .order_by_desc(Column::Created)
            .order_by_desc(Column::Id)
            .offset(page.offset)
            .limit(page.limit)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}
