use axum_helpers::validation::not_blank;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A registered ShareIt user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// DTO for registering a user
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(max = 255), custom(function = "not_blank"))]
    pub name: String,
    #[validate(email, length(max = 512))]
    pub email: String,
}

/// DTO for a partial user update; absent fields keep their value
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(length(max = 255), custom(function = "not_blank"))]
    pub name: Option<String>,
    #[validate(email, length(max = 512))]
    pub email: Option<String>,
}

impl User {
    pub fn apply_update(&mut self, update: UpdateUser) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_validation() {
        let valid = CreateUser {
            name: "Ann".into(),
            email: "ann@example.com".into(),
        };
        assert!(valid.validate().is_ok());

        let blank_name = CreateUser {
            name: "  ".into(),
            email: "ann@example.com".into(),
        };
        assert!(blank_name.validate().is_err());

        let bad_email = CreateUser {
            name: "Ann".into(),
            email: "not-an-email".into(),
        };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_update_user_validates_only_present_fields() {
        assert!(UpdateUser::default().validate().is_ok());

        let blank = UpdateUser {
            name: Some("".into()),
            email: None,
        };
        assert!(blank.validate().is_err());

        let bad_email = UpdateUser {
            name: None,
            email: Some("ann.example.com".into()),
        };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_apply_update_is_partial() {
        let mut user = User {
            id: 1,
            name: "Ann".into(),
            email: "ann@example.com".into(),
        };
        user.apply_update(UpdateUser {
            name: None,
            email: Some("ann@shareit.test".into()),
        });
        assert_eq!(user.name, "Ann");
        assert_eq!(user.email, "ann@shareit.test");
    }
}
