//! Business rules of the sharing domain.

mod bookings;
mod items;
mod requests;

pub use bookings::BookingService;
pub use items::ItemService;
pub use requests::ItemRequestService;

use domain_users::{User, UserRepository};
use validator::Validate;

use crate::error::{SharingError, SharingResult};

async fn require_user(users: &dyn UserRepository, id: i64) -> SharingResult<User> {
    users
        .get_by_id(id)
        .await?
        .ok_or(SharingError::UserNotFound(id))
}

fn validate<T: Validate>(input: &T) -> SharingResult<()> {
    input
        .validate()
        .map_err(|e| SharingError::Validation(e.to_string()))
}

#[cfg(test)]
mod test_support {
    use domain_users::User;
    use std::sync::Arc;

    use crate::Repositories;
    use crate::repository::{
        MockBookingRepository, MockCommentRepository, MockItemRepository,
        MockItemRequestRepository,
    };

    /// Mocks for every repository; users are kept in memory and get ids
    /// 1, 2, ... in the order their names are listed
    #[derive(Default)]
    pub struct Mocks {
        pub users: Vec<&'static str>,
        pub items: MockItemRepository,
        pub bookings: MockBookingRepository,
        pub comments: MockCommentRepository,
        pub requests: MockItemRequestRepository,
    }

    impl Mocks {
        pub async fn into_repositories(self) -> Repositories {
            use domain_users::{CreateUser, InMemoryUserRepository, UserRepository};

            let users = InMemoryUserRepository::new();
            for (index, name) in self.users.into_iter().enumerate() {
                let expected = user(index as i64 + 1, name);
                users
                    .create(CreateUser {
                        name: expected.name,
                        email: expected.email,
                    })
                    .await
                    .unwrap();
            }

            Repositories {
                users: Arc::new(users),
                items: Arc::new(self.items),
                bookings: Arc::new(self.bookings),
                comments: Arc::new(self.comments),
                requests: Arc::new(self.requests),
            }
        }
    }

    pub fn user(id: i64, name: &str) -> User {
        User {
            id,
            name: name.into(),
            email: format!("{}@example.com", name.to_lowercase()),
        }
    }
}
