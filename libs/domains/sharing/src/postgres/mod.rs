//! PostgreSQL implementations of the sharing repositories using SeaORM.

mod booking;
mod comment;
mod item;
mod item_request;

pub use booking::PgBookingRepository;
pub use comment::PgCommentRepository;
pub use item::PgItemRepository;
pub use item_request::PgItemRequestRepository;

use sea_orm::DbErr;

use crate::error::SharingError;

fn db_error(e: DbErr) -> SharingError {
    SharingError::Internal(format!("Database error: {}", e))
}
