//! Request shapes checked before anything reaches the server.
//!
//! They mirror the server DTOs field for field and are re-serialised when
//! forwarded, so unknown fields are dropped at the edge.

use axum_helpers::{AppError, validation::not_blank};
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::EnumString;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(max = 255), custom(function = "not_blank"))]
    pub name: String,
    #[validate(email, length(max = 512))]
    pub email: String,
}

#[derive(Debug, Default, Deserialize, Serialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 255), custom(function = "not_blank"))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email, length(max = 512))]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItem {
    #[validate(length(max = 255), custom(function = "not_blank"))]
    pub name: String,
    #[validate(length(max = 255), custom(function = "not_blank"))]
    pub description: String,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize, Serialize, Validate, ToSchema)]
pub struct UpdateItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 255), custom(function = "not_blank"))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 255), custom(function = "not_blank"))]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}

#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateComment {
    #[validate(length(max = 1000), custom(function = "not_blank"))]
    pub text: String,
}

#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateItemRequest {
    #[validate(length(max = 555), custom(function = "not_blank"))]
    pub description: String,
}

/// Booking dates are local wall-clock times, e.g. `2025-10-20T10:00:00`
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "end_after_start"))]
pub struct CreateBooking {
    pub item_id: i64,
    #[validate(custom(function = "not_in_past"))]
    pub start: NaiveDateTime,
    #[validate(custom(function = "in_future"))]
    pub end: NaiveDateTime,
}

fn not_in_past(value: &NaiveDateTime) -> Result<(), ValidationError> {
    // Second precision so "now" sent by a client is still accepted
    let now = Local::now().naive_local() - chrono::Duration::seconds(1);
    if *value < now {
        return Err(ValidationError::new("past").with_message("must not be in the past".into()));
    }
    Ok(())
}

fn in_future(value: &NaiveDateTime) -> Result<(), ValidationError> {
    if *value <= Local::now().naive_local() {
        return Err(ValidationError::new("future").with_message("must be in the future".into()));
    }
    Ok(())
}

fn end_after_start(booking: &CreateBooking) -> Result<(), ValidationError> {
    if booking.end <= booking.start {
        return Err(ValidationError::new("period").with_message("end must be after start".into()));
    }
    Ok(())
}

/// Accepted `?state=` values, matched case-insensitively
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum BookingState {
    All,
    Current,
    Past,
    Future,
    Waiting,
    Rejected,
}

#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookingListQuery {
    /// ALL (default), CURRENT, PAST, FUTURE, WAITING or REJECTED
    pub state: Option<String>,
    #[validate(range(min = 0))]
    pub from: Option<i64>,
    #[validate(range(min = 1))]
    pub size: Option<i64>,
}

impl BookingListQuery {
    /// Unknown states are rejected with the same message the server uses.
    pub fn check_state(&self) -> Result<(), AppError> {
        match self.state.as_deref() {
            Some(state) if BookingState::from_str(state).is_err() => {
                Err(AppError::BadRequest(format!("Unknown state: {}", state)))
            }
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    #[validate(range(min = 0))]
    pub from: Option<i64>,
    #[validate(range(min = 1))]
    pub size: Option<i64>,
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ApproveQuery {
    pub approved: bool,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    #[serde(default)]
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn booking(start_in_hours: i64, end_in_hours: i64) -> CreateBooking {
        let now = Local::now().naive_local();
        CreateBooking {
            item_id: 1,
            start: now + Duration::hours(start_in_hours),
            end: now + Duration::hours(end_in_hours),
        }
    }

    #[test]
    fn test_booking_dates() {
        assert!(booking(1, 2).validate().is_ok());
        assert!(booking(-1, 2).validate().is_err());
        assert!(booking(-3, -2).validate().is_err());
        assert!(booking(2, 1).validate().is_err());
        assert!(booking(2, 2).validate().is_err());
    }

    #[test]
    fn test_booking_accepts_wire_format() {
        let booking: CreateBooking = serde_json::from_str(
            r#"{"itemId": 3, "start": "2099-10-20T10:00:00", "end": "2099-10-21T10:00:00"}"#,
        )
        .unwrap();
        assert_eq!(booking.item_id, 3);
        assert!(booking.validate().is_ok());
    }

    #[test]
    fn test_item_validation() {
        let item = CreateItem {
            name: "Drill".into(),
            description: "Cordless".into(),
            available: true,
            request_id: None,
        };
        assert!(item.validate().is_ok());

        let blank = CreateItem {
            description: " ".into(),
            ..item
        };
        assert!(blank.validate().is_err());

        assert!(UpdateItem::default().validate().is_ok());
        let blank_update = UpdateItem {
            name: Some("".into()),
            ..Default::default()
        };
        assert!(blank_update.validate().is_err());
    }

    #[test]
    fn test_item_requires_available() {
        let parsed = serde_json::from_str::<CreateItem>(r#"{"name": "Drill", "description": "x"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_update_serialises_only_present_fields() {
        let update = UpdateUser {
            name: Some("Ann".into()),
            email: None,
        };
        assert_eq!(serde_json::to_string(&update).unwrap(), r#"{"name":"Ann"}"#);
    }

    #[test]
    fn test_text_limits() {
        let comment = CreateComment {
            text: "x".repeat(1001),
        };
        assert!(comment.validate().is_err());

        let request = CreateItemRequest {
            description: "Need a ladder".into(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_state_check() {
        let query = |state: &str| BookingListQuery {
            state: Some(state.to_string()),
            ..Default::default()
        };

        assert!(query("waiting").check_state().is_ok());
        assert!(query("ALL").check_state().is_ok());
        assert!(BookingListQuery::default().check_state().is_ok());

        match query("SOMEDAY").check_state() {
            Err(AppError::BadRequest(message)) => assert_eq!(message, "Unknown state: SOMEDAY"),
            other => panic!("unexpected {:?}", other.err()),
        }
    }

    #[test]
    fn test_page_query_bounds() {
        let page = PageQuery {
            from: Some(-1),
            size: None,
        };
        assert!(page.validate().is_err());

        let page = PageQuery {
            from: Some(0),
            size: Some(0),
        };
        assert!(page.validate().is_err());
    }
}
