//! In-memory repositories (for development/testing).
//!
//! Clones share the same table. [`CascadingUserRepository`] removes a deleted
//! user's rows the way the PostgreSQL foreign keys do.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use domain_users::{
    CreateUser, InMemoryUserRepository, UpdateUser, User, UserRepository, UserResult,
};
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{
    BookingFilter, BookingRepository, CommentRepository, ItemRepository, ItemRequestRepository,
};
use crate::error::{SharingError, SharingResult};
use crate::models::{
    Booking, BookingStatus, Comment, CreateBooking, CreateItem, CreateItemRequest, Item,
    ItemRequest, NewComment, Page, UpdateItem,
};

#[derive(Debug)]
struct Table<T> {
    next_id: i64,
    rows: BTreeMap<i64, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            rows: BTreeMap::new(),
        }
    }
}

impl<T: Clone> Table<T> {
    fn insert_with(&mut self, build: impl FnOnce(i64) -> T) -> T {
        self.next_id += 1;
        let row = build(self.next_id);
        self.rows.insert(self.next_id, row.clone());
        row
    }

    fn filtered(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows.values().filter(|row| predicate(row)).cloned().collect()
    }

    /// Drop matching rows and return their ids
    fn remove_where(&mut self, predicate: impl Fn(&T) -> bool) -> Vec<i64> {
        let ids: Vec<i64> = self
            .rows
            .iter()
            .filter(|(_, row)| predicate(row))
            .map(|(id, _)| *id)
            .collect();
        for id in &ids {
            self.rows.remove(id);
        }
        ids
    }
}

type Shared<T> = Arc<RwLock<Table<T>>>;

#[derive(Debug, Default, Clone)]
pub struct InMemoryItemRepository {
    table: Shared<Item>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn create(&self, owner_id: i64, input: CreateItem) -> SharingResult<Item> {
        let item = self.table.write().await.insert_with(|id| Item {
            id,
            name: input.name,
            description: input.description,
            available: input.available,
            owner_id,
            request_id: input.request_id,
        });

        tracing::info!(item_id = item.id, owner_id, "Created item");
        Ok(item)
    }

    async fn get_by_id(&self, id: i64) -> SharingResult<Option<Item>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn update(&self, id: i64, input: UpdateItem) -> SharingResult<Item> {
        let mut table = self.table.write().await;
        let item = table.rows.get_mut(&id).ok_or(SharingError::ItemNotFound(id))?;
        item.apply_update(input);

        tracing::info!(item_id = id, "Updated item");
        Ok(item.clone())
    }

    async fn list_by_owner(&self, owner_id: i64) -> SharingResult<Vec<Item>> {
        Ok(self.table.read().await.filtered(|i| i.owner_id == owner_id))
    }

    async fn list_by_ids(&self, ids: Vec<i64>) -> SharingResult<Vec<Item>> {
        Ok(self.table.read().await.filtered(|i| ids.contains(&i.id)))
    }

    async fn search(&self, text: &str) -> SharingResult<Vec<Item>> {
        let needle = text.to_lowercase();
        Ok(self.table.read().await.filtered(|i| {
            i.available
                && (i.name.to_lowercase().contains(&needle)
                    || i.description.to_lowercase().contains(&needle))
        }))
    }

    async fn list_by_requests(&self, request_ids: Vec<i64>) -> SharingResult<Vec<Item>> {
        Ok(self
            .table
            .read()
            .await
            .filtered(|i| i.request_id.is_some_and(|r| request_ids.contains(&r))))
    }
}

/// Bookings share the item table so an approval can take the item off the
/// shelf under the same lock.
#[derive(Debug, Clone)]
pub struct InMemoryBookingRepository {
    table: Shared<Booking>,
    items: Shared<Item>,
}

impl InMemoryBookingRepository {
    pub fn new(items: &InMemoryItemRepository) -> Self {
        Self {
            table: Arc::default(),
            items: items.table.clone(),
        }
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn create(&self, booker_id: i64, input: CreateBooking) -> SharingResult<Booking> {
        let booking = self.table.write().await.insert_with(|id| Booking {
            id,
            start: input.start,
            end: input.end,
            item_id: input.item_id,
            booker_id,
            status: BookingStatus::Waiting,
        });

        tracing::info!(booking_id = booking.id, booker_id, "Created booking");
        Ok(booking)
    }

    async fn get_by_id(&self, id: i64) -> SharingResult<Option<Booking>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn decide(&self, id: i64, status: BookingStatus) -> SharingResult<Booking> {
        let mut table = self.table.write().await;
        let booking = table
            .rows
            .get_mut(&id)
            .ok_or(SharingError::BookingNotFound(id))?;
        if booking.status != BookingStatus::Waiting {
            return Err(SharingError::AlreadyDecided {
                booking_id: id,
                status: booking.status,
            });
        }

        if status == BookingStatus::Approved {
            let mut items = self.items.write().await;
            let item = items
                .rows
                .get_mut(&booking.item_id)
                .ok_or(SharingError::ItemNotFound(booking.item_id))?;
            item.available = false;
        }
        booking.status = status;

        tracing::info!(booking_id = id, %status, "Decided booking");
        Ok(booking.clone())
    }

    async fn list(&self, filter: BookingFilter) -> SharingResult<Vec<Booking>> {
        let mut bookings = self.table.read().await.filtered(|b| filter.matches(b));
        bookings.sort_by_key(|b| (Reverse(b.start), Reverse(b.id)));

        Ok(match filter.page {
            Some(page) => page.apply(bookings),
            None => bookings,
        })
    }

    async fn list_approved_for_items(&self, item_ids: Vec<i64>) -> SharingResult<Vec<Booking>> {
        Ok(self.table.read().await.filtered(|b| {
            b.status == BookingStatus::Approved && item_ids.contains(&b.item_id)
        }))
    }

    async fn has_finished_booking(
        &self,
        booker_id: i64,
        item_id: i64,
        now: NaiveDateTime,
    ) -> SharingResult<bool> {
        Ok(self.table.read().await.rows.values().any(|b| {
            b.booker_id == booker_id
                && b.item_id == item_id
                && b.status == BookingStatus::Approved
                && b.end < now
        }))
    }
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryCommentRepository {
    table: Shared<Comment>,
}

impl InMemoryCommentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn create(&self, input: NewComment) -> SharingResult<Comment> {
        let comment = self.table.write().await.insert_with(|id| Comment {
            id,
            text: input.text,
            item_id: input.item_id,
            author_id: input.author_id,
            created: input.created,
        });

        tracing::info!(comment_id = comment.id, item_id = comment.item_id, "Created comment");
        Ok(comment)
    }

    async fn list_by_items(&self, item_ids: Vec<i64>) -> SharingResult<Vec<Comment>> {
        let mut comments = self
            .table
            .read()
            .await
            .filtered(|c| item_ids.contains(&c.item_id));
        comments.sort_by_key(|c| (c.created, c.id));
        Ok(comments)
    }
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryItemRequestRepository {
    table: Shared<ItemRequest>,
}

impl InMemoryItemRequestRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(mut requests: Vec<ItemRequest>) -> Vec<ItemRequest> {
    requests.sort_by_key(|r| (Reverse(r.created), Reverse(r.id)));
    requests
}

#[async_trait]
impl ItemRequestRepository for InMemoryItemRequestRepository {
    async fn create(
        &self,
        requestor_id: i64,
        input: CreateItemRequest,
        created: NaiveDateTime,
    ) -> SharingResult<ItemRequest> {
        let request = self.table.write().await.insert_with(|id| ItemRequest {
            id,
            description: input.description,
            requestor_id,
            created,
        });

        tracing::info!(request_id = request.id, requestor_id, "Created item request");
        Ok(request)
    }

    async fn get_by_id(&self, id: i64) -> SharingResult<Option<ItemRequest>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn list_by_requestor(&self, requestor_id: i64) -> SharingResult<Vec<ItemRequest>> {
        let requests = self
            .table
            .read()
            .await
            .filtered(|r| r.requestor_id == requestor_id);
        Ok(newest_first(requests))
    }

    async fn list_others(&self, user_id: i64, page: Page) -> SharingResult<Vec<ItemRequest>> {
        let requests = self
            .table
            .read()
            .await
            .filtered(|r| r.requestor_id != user_id);
        Ok(page.apply(newest_first(requests)))
    }
}

/// [`InMemoryUserRepository`] whose deletes also clear the sharing tables:
/// owned items with their bookings and comments, the user's own bookings,
/// comments and requests. Items answering a removed request lose the link.
#[derive(Debug, Clone)]
pub struct CascadingUserRepository {
    users: InMemoryUserRepository,
    items: Shared<Item>,
    bookings: Shared<Booking>,
    comments: Shared<Comment>,
    requests: Shared<ItemRequest>,
}

impl CascadingUserRepository {
    pub fn new(
        users: InMemoryUserRepository,
        items: &InMemoryItemRepository,
        bookings: &InMemoryBookingRepository,
        comments: &InMemoryCommentRepository,
        requests: &InMemoryItemRequestRepository,
    ) -> Self {
        Self {
            users,
            items: items.table.clone(),
            bookings: bookings.table.clone(),
            comments: comments.table.clone(),
            requests: requests.table.clone(),
        }
    }

    async fn purge(&self, user_id: i64) {
        let requests = self
            .requests
            .write()
            .await
            .remove_where(|r| r.requestor_id == user_id);

        let items = {
            let mut table = self.items.write().await;
            let removed = table.remove_where(|i| i.owner_id == user_id);
            for item in table.rows.values_mut() {
                if item.request_id.is_some_and(|r| requests.contains(&r)) {
                    item.request_id = None;
                }
            }
            removed
        };

        let bookings = self
            .bookings
            .write()
            .await
            .remove_where(|b| b.booker_id == user_id || items.contains(&b.item_id));
        let comments = self
            .comments
            .write()
            .await
            .remove_where(|c| c.author_id == user_id || items.contains(&c.item_id));

        tracing::info!(
            user_id,
            items = items.len(),
            bookings = bookings.len(),
            comments = comments.len(),
            requests = requests.len(),
            "Removed rows of deleted user"
        );
    }
}

#[async_trait]
impl UserRepository for CascadingUserRepository {
    async fn create(&self, input: CreateUser) -> UserResult<User> {
        self.users.create(input).await
    }

    async fn get_by_id(&self, id: i64) -> UserResult<Option<User>> {
        self.users.get_by_id(id).await
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        self.users.list().await
    }

    async fn list_by_ids(&self, ids: Vec<i64>) -> UserResult<Vec<User>> {
        self.users.list_by_ids(ids).await
    }

    async fn update(&self, id: i64, input: UpdateUser) -> UserResult<User> {
        self.users.update(id, input).await
    }

    async fn delete(&self, id: i64) -> UserResult<bool> {
        let removed = self.users.delete(id).await?;
        if removed {
            self.purge(id).await;
        }
        Ok(removed)
    }

    async fn email_exists(&self, email: &str, exclude_id: Option<i64>) -> UserResult<bool> {
        self.users.email_exists(email, exclude_id).await
    }
}
