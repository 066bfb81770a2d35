use axum_helpers::validation::not_blank;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::{BookingShort, CommentResponse};

/// An item offered for sharing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub owner_id: i64,
    /// Request this item was listed in answer to
    pub request_id: Option<i64>,
}

/// DTO for listing a new item
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItem {
    #[validate(length(max = 255), custom(function = "not_blank"))]
    pub name: String,
    #[validate(length(max = 255), custom(function = "not_blank"))]
    pub description: String,
    pub available: bool,
    pub request_id: Option<i64>,
}

/// DTO for a partial item update
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItem {
    #[validate(length(max = 255), custom(function = "not_blank"))]
    pub name: Option<String>,
    #[validate(length(max = 255), custom(function = "not_blank"))]
    pub description: Option<String>,
    pub available: Option<bool>,
}

impl Item {
    pub fn apply_update(&mut self, update: UpdateItem) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(available) = update.available {
            self.available = available;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ItemOwner {
    pub id: i64,
    pub name: String,
}

/// Item as returned by the item endpoints.
///
/// `last_booking`/`next_booking` are only filled in for the owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub owner: ItemOwner,
    pub request_id: Option<i64>,
    pub last_booking: Option<BookingShort>,
    pub next_booking: Option<BookingShort>,
    pub comments: Vec<CommentResponse>,
}

impl ItemResponse {
    pub fn new(item: Item, owner: ItemOwner) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            available: item.available,
            owner,
            request_id: item.request_id,
            last_booking: None,
            next_booking: None,
            comments: Vec::new(),
        }
    }
}

/// `?text=` parameter of the item search
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Case-insensitive fragment of the name or description
    #[serde(default)]
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_item_validation() {
        let item = CreateItem {
            name: "Drill".into(),
            description: "Cordless".into(),
            available: true,
            request_id: None,
        };
        assert!(item.validate().is_ok());

        let blank = CreateItem {
            description: " ".into(),
            ..item.clone()
        };
        assert!(blank.validate().is_err());

        let long = CreateItem {
            name: "x".repeat(256),
            ..item
        };
        assert!(long.validate().is_err());
    }

    #[test]
    fn test_create_item_requires_available() {
        let parsed = serde_json::from_value::<CreateItem>(json!({
            "name": "Drill",
            "description": "Cordless"
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_item_serializes_camel_case() {
        let item = Item {
            id: 1,
            name: "Drill".into(),
            description: "Cordless".into(),
            available: true,
            owner_id: 2,
            request_id: Some(3),
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["ownerId"], 2);
        assert_eq!(value["requestId"], 3);
    }

    #[test]
    fn test_apply_update_keeps_missing_fields() {
        let mut item = Item {
            id: 1,
            name: "Drill".into(),
            description: "Cordless".into(),
            available: true,
            owner_id: 2,
            request_id: None,
        };
        item.apply_update(UpdateItem {
            available: Some(false),
            ..Default::default()
        });
        assert_eq!(item.name, "Drill");
        assert!(!item.available);
    }
}
