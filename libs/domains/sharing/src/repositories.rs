use domain_users::{InMemoryUserRepository, PgUserRepository, UserRepository};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::postgres::{
    PgBookingRepository, PgCommentRepository, PgItemRepository, PgItemRequestRepository,
};
use crate::repository::{
    BookingRepository, CascadingUserRepository, CommentRepository, InMemoryBookingRepository,
    InMemoryCommentRepository, InMemoryItemRepository, InMemoryItemRequestRepository,
    ItemRepository, ItemRequestRepository,
};

/// One implementation of every repository the sharing services read from.
///
/// Users are shared with the users domain so that both routers see the same
/// accounts.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub items: Arc<dyn ItemRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub requests: Arc<dyn ItemRequestRepository>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        Self::in_memory_with_users(InMemoryUserRepository::new())
    }

    /// In-memory storage reading users from an existing store.
    ///
    /// Deleting a user through [`Repositories::users`] removes their rows from
    /// the other tables.
    pub fn in_memory_with_users(users: InMemoryUserRepository) -> Self {
        let items = InMemoryItemRepository::new();
        let bookings = InMemoryBookingRepository::new(&items);
        let comments = InMemoryCommentRepository::new();
        let requests = InMemoryItemRequestRepository::new();
        let users = CascadingUserRepository::new(users, &items, &bookings, &comments, &requests);

        Self {
            users: Arc::new(users),
            items: Arc::new(items),
            bookings: Arc::new(bookings),
            comments: Arc::new(comments),
            requests: Arc::new(requests),
        }
    }

    pub fn postgres(db: DatabaseConnection) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(db.clone())),
            items: Arc::new(PgItemRepository::new(db.clone())),
            bookings: Arc::new(PgBookingRepository::new(db.clone())),
            comments: Arc::new(PgCommentRepository::new(db.clone())),
            requests: Arc::new(PgItemRequestRepository::new(db)),
        }
    }
}
