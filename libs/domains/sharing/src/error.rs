use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_users::UserError;
use thiserror::Error;

use crate::models::BookingStatus;

#[derive(Debug, Error)]
pub enum SharingError {
    #[error("User {0} not found")]
    UserNotFound(i64),

    #[error("Item {0} not found")]
    ItemNotFound(i64),

    #[error("Booking {0} not found")]
    BookingNotFound(i64),

    #[error("Item request {0} not found")]
    RequestNotFound(i64),

    #[error("Item {0} is not available for booking")]
    ItemUnavailable(i64),

    #[error("Booking end must be after its start")]
    InvalidBookingPeriod,

    #[error("Booking {booking_id} is already {status}")]
    AlreadyDecided {
        booking_id: i64,
        status: BookingStatus,
    },

    #[error("Unknown state: {0}")]
    UnknownState(String),

    #[error("User {user_id} has no completed booking of item {item_id}")]
    CommentNotAllowed { user_id: i64, item_id: i64 },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("User {user_id} is not the owner of item {item_id}")]
    NotItemOwner { user_id: i64, item_id: i64 },

    #[error("User {user_id} may not view booking {booking_id}")]
    BookingAccessDenied { user_id: i64, booking_id: i64 },

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type SharingResult<T> = Result<T, SharingError>;

impl From<UserError> for SharingError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(id) => SharingError::UserNotFound(id),
            UserError::Internal(msg) => SharingError::Internal(msg),
            other => SharingError::Validation(other.to_string()),
        }
    }
}

impl From<SharingError> for AppError {
    fn from(err: SharingError) -> Self {
        let message = err.to_string();
        match err {
            SharingError::UserNotFound(_)
            | SharingError::ItemNotFound(_)
            | SharingError::BookingNotFound(_)
            | SharingError::RequestNotFound(_) => AppError::NotFound(message),
            SharingError::ItemUnavailable(_)
            | SharingError::InvalidBookingPeriod
            | SharingError::AlreadyDecided { .. }
            | SharingError::UnknownState(_)
            | SharingError::CommentNotAllowed { .. }
            | SharingError::Validation(_) => AppError::BadRequest(message),
            SharingError::NotItemOwner { .. } | SharingError::BookingAccessDenied { .. } => {
                AppError::Forbidden(message)
            }
            SharingError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for SharingError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
