use async_trait::async_trait;
use chrono::NaiveDateTime;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};

use super::db_error;
use crate::entity::booking::{ActiveModel, Column, Entity};
use crate::entity::item;
use crate::error::{SharingError, SharingResult};
use crate::models::{Booking, BookingState, BookingStatus, CreateBooking};
use crate::repository::{BookingFilter, BookingRepository};

#[derive(Clone)]
pub struct PgBookingRepository {
    db: DatabaseConnection,
}

impl PgBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn state_condition(state: BookingState, now: NaiveDateTime) -> Condition {
    let condition = Condition::all();
    match state {
        BookingState::All => condition,
        BookingState::Current => condition
            .add(Column::StartDate.lt(now))
            .add(Column::EndDate.gt(now)),
        BookingState::Past => condition.add(Column::EndDate.lt(now)),
        BookingState::Future => condition.add(Column::StartDate.gt(now)),
        BookingState::Waiting => condition.add(Column::Status.eq(BookingStatus::Waiting)),
        BookingState::Rejected => condition.add(Column::Status.eq(BookingStatus::Rejected)),
    }
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn create(&self, booker_id: i64, input: CreateBooking) -> SharingResult<Booking> {
        let model = ActiveModel::waiting(booker_id, input)
            .insert(&self.db)
            .await
            .map_err(db_error)?;

        tracing::info!(booking_id = model.id, booker_id, "Created booking");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i64) -> SharingResult<Option<Booking>> {
        let model = Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(model.map(Into::into))
    }

    async fn decide(&self, id: i64, status: BookingStatus) -> SharingResult<Booking> {
        let txn = self.db.begin().await.map_err(db_error)?;

        // Only a row still WAITING is moved
        let result = Entity::update_many()
            .set(ActiveModel {
                status: Set(status),
                ..Default::default()
            })
            .filter(Column::Id.eq(id))
            .filter(Column::Status.eq(BookingStatus::Waiting))
            .exec(&txn)
            .await
            .map_err(db_error)?;

        let model = Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_error)?
            .ok_or(SharingError::BookingNotFound(id))?;

        if result.rows_affected == 0 {
            return Err(SharingError::AlreadyDecided {
                booking_id: id,
                status: model.status,
            });
        }

        if status == BookingStatus::Approved {
            item::Entity::update_many()
                .col_expr(item::Column::Available, Expr::value(false))
                .filter(item::Column::Id.eq(model.item_id))
                .exec(&txn)
                .await
                .map_err(db_error)?;
        }

        txn.commit().await.map_err(db_error)?;

        tracing::info!(booking_id = id, %status, "Decided booking");
        Ok(model.into())
    }

    async fn list(&self, filter: BookingFilter) -> SharingResult<Vec<Booking>> {
        let mut query = Entity::find().filter(state_condition(filter.state, filter.now));

        if let Some(booker_id) = filter.booker_id {
            query = query.filter(Column::BookerId.eq(booker_id));
        }
        if let Some(item_ids) = filter.item_ids {
            if item_ids.is_empty() {
                return Ok(Vec::new());
            }
            query = query.filter(Column::ItemId.is_in(item_ids));
        }

        query = query
            .order_by_desc(Column::StartDate)
            .order_by_desc(Column::Id);
        if let Some(page) = filter.page {
            query = query.offset(page.offset).limit(page.limit);
        }

        let models = query.all(&self.db).await.map_err(db_error)?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn list_approved_for_items(&self, item_ids: Vec<i64>) -> SharingResult<Vec<Booking>> {
        if item_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = Entity::find()
            .filter(Column::ItemId.is_in(item_ids))
            .filter(Column::Status.eq(BookingStatus::Approved))
            .order_by_asc(Column::StartDate)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn has_finished_booking(
        &self,
        booker_id: i64,
        item_id: i64,
        now: NaiveDateTime,
    ) -> SharingResult<bool> {
        let count = Entity::find()
            .filter(Column::BookerId.eq(booker_id))
            .filter(Column::ItemId.eq(item_id))
            .filter(Column::Status.eq(BookingStatus::Approved))
            .filter(Column::EndDate.lt(now))
            .count(&self.db)
            .await
            .map_err(db_error)?;

        Ok(count > 0)
    }
}
