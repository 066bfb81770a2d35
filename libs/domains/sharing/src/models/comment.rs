use axum_helpers::validation::not_blank;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A review left on an item by someone who has borrowed it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub text: String,
    pub item_id: i64,
    pub author_id: i64,
    pub created: NaiveDateTime,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateComment {
    #[validate(length(max = 1000), custom(function = "not_blank"))]
    pub text: String,
}

/// Row to insert; `created` is stamped by the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub text: String,
    pub item_id: i64,
    pub author_id: i64,
    pub created: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: i64,
    pub text: String,
    pub author_name: String,
    pub created: NaiveDateTime,
}

impl CommentResponse {
    pub fn new(comment: Comment, author_name: impl Into<String>) -> Self {
        Self {
            id: comment.id,
            text: comment.text,
            author_name: author_name.into(),
            created: comment.created,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_comment_validation() {
        assert!(CreateComment { text: "Great".into() }.validate().is_ok());
        assert!(CreateComment { text: "".into() }.validate().is_err());
        assert!(
            CreateComment {
                text: "a".repeat(1001)
            }
            .validate()
            .is_err()
        );
    }
}
