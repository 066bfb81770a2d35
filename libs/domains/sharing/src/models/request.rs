use axum_helpers::validation::not_blank;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::Item;

/// A wish for an item nobody has listed yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRequest {
    pub id: i64,
    pub description: String,
    pub requestor_id: i64,
    pub created: NaiveDateTime,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateItemRequest {
    #[validate(length(max = 555), custom(function = "not_blank"))]
    pub description: String,
}

/// Request together with the items listed in answer to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequestResponse {
    pub id: i64,
    pub description: String,
    pub created: NaiveDateTime,
    pub requestor_id: i64,
    pub items: Vec<Item>,
}

impl ItemRequestResponse {
    pub fn new(request: ItemRequest, items: Vec<Item>) -> Self {
        Self {
            id: request.id,
            description: request.description,
            created: request.created,
            requestor_id: request.requestor_id,
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_validation() {
        let ok = CreateItemRequest {
            description: "Need a ladder".into(),
        };
        assert!(ok.validate().is_ok());
        assert!(
            CreateItemRequest {
                description: "\t".into()
            }
            .validate()
            .is_err()
        );
        assert!(
            CreateItemRequest {
                description: "a".repeat(556)
            }
            .validate()
            .is_err()
        );
    }
}
