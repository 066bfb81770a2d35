use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

use super::db_error;
use crate::entity::comment::{ActiveModel, Column, Entity};
use crate::error::SharingResult;
use crate::models::{Comment, NewComment};
use crate::repository::CommentRepository;

#[derive(Clone)]
pub struct PgCommentRepository {
    db: DatabaseConnection,
}

impl PgCommentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    async fn create(&self, input: NewComment) -> SharingResult<Comment> {
        let active_model: ActiveModel = input.into();
        let model = active_model.insert(&self.db).await.map_err(db_error)?;

        tracing::info!(comment_id = model.id, item_id = model.item_id, "Created comment");
        Ok(model.into())
    }

    async fn list_by_items(&self, item_ids: Vec<i64>) -> SharingResult<Vec<Comment>> {
        if item_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = Entity::find()
            .filter(Column::ItemId.is_in(item_ids))
            .order_by_asc(Column::Created)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}
