use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

use crate::models::BookingStatus;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub start_date: DateTime,
    pub end_date: DateTime,
    pub item_id: i64,
    pub booker_id: i64,
    pub status: BookingStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::Booking {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            start: model.start_date,
            end: model.end_date,
            item_id: model.item_id,
            booker_id: model.booker_id,
            status: model.status,
        }
    }
}

impl ActiveModel {
    pub fn waiting(booker_id: i64, input: crate::models::CreateBooking) -> Self {
        ActiveModel {
            start_date: Set(input.start),
            end_date: Set(input.end),
            item_id: Set(input.item_id),
            booker_id: Set(booker_id),
            status: Set(BookingStatus::Waiting),
            ..Default::default()
        }
    }
}
