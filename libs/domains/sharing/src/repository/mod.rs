//! Persistence seams of the sharing domain.
//!
//! Each aggregate has its own trait so services can be tested against mocks;
//! [`Repositories`](crate::Repositories) bundles one implementation of each.

mod in_memory;

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::error::SharingResult;
use crate::models::{
    Booking, BookingState, BookingStatus, Comment, CreateBooking, CreateItem, CreateItemRequest,
    Item, ItemRequest, NewComment, Page, UpdateItem,
};

pub use in_memory::{
    CascadingUserRepository, InMemoryBookingRepository, InMemoryCommentRepository,
    InMemoryItemRepository, InMemoryItemRequestRepository,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn create(&self, owner_id: i64, input: CreateItem) -> SharingResult<Item>;

    async fn get_by_id(&self, id: i64) -> SharingResult<Option<Item>>;

    /// Apply a partial update to an existing item
    async fn update(&self, id: i64, input: UpdateItem) -> SharingResult<Item>;

    /// Items of one owner ordered by id
    async fn list_by_owner(&self, owner_id: i64) -> SharingResult<Vec<Item>>;

    async fn list_by_ids(&self, ids: Vec<i64>) -> SharingResult<Vec<Item>>;

    /// Available items whose name or description contains `text`, ignoring case
    async fn search(&self, text: &str) -> SharingResult<Vec<Item>>;

    /// Items listed in answer to any of the given requests, ordered by id
    async fn list_by_requests(&self, request_ids: Vec<i64>) -> SharingResult<Vec<Item>>;
}

/// Selection of bookings for the booker and owner lists
#[derive(Debug, Clone, PartialEq)]
pub struct BookingFilter {
    pub booker_id: Option<i64>,
    /// Restrict to bookings of these items; an empty list matches nothing
    pub item_ids: Option<Vec<i64>>,
    pub state: BookingState,
    pub now: NaiveDateTime,
    pub page: Option<Page>,
}

impl BookingFilter {
    pub fn by_booker(booker_id: i64, state: BookingState, now: NaiveDateTime) -> Self {
        Self {
            booker_id: Some(booker_id),
            item_ids: None,
            state,
            now,
            page: None,
        }
    }

    pub fn by_items(item_ids: Vec<i64>, state: BookingState, now: NaiveDateTime) -> Self {
        Self {
            booker_id: None,
            item_ids: Some(item_ids),
            state,
            now,
            page: None,
        }
    }

    pub fn with_page(mut self, page: Option<Page>) -> Self {
        self.page = page;
        self
    }

    pub fn matches(&self, booking: &Booking) -> bool {
        self.booker_id.is_none_or(|id| booking.booker_id == id)
            && self
                .item_ids
                .as_ref()
                .is_none_or(|ids| ids.contains(&booking.item_id))
            && self.state.matches(booking, self.now)
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Store a new WAITING booking
    async fn create(&self, booker_id: i64, input: CreateBooking) -> SharingResult<Booking>;

    async fn get_by_id(&self, id: i64) -> SharingResult<Option<Booking>>;

    /// Move a WAITING booking to `status` in one atomic step. Approval also
    /// marks the item unavailable. Anything but WAITING is `AlreadyDecided`.
    async fn decide(&self, id: i64, status: BookingStatus) -> SharingResult<Booking>;

    /// Matching bookings, newest start first
    async fn list(&self, filter: BookingFilter) -> SharingResult<Vec<Booking>>;

    /// APPROVED bookings of the given items
    async fn list_approved_for_items(&self, item_ids: Vec<i64>) -> SharingResult<Vec<Booking>>;

    /// Whether `booker_id` has an APPROVED booking of `item_id` that ended before `now`
    async fn has_finished_booking(
        &self,
        booker_id: i64,
        item_id: i64,
        now: NaiveDateTime,
    ) -> SharingResult<bool>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create(&self, input: NewComment) -> SharingResult<Comment>;

    /// Comments on the given items, oldest first
    async fn list_by_items(&self, item_ids: Vec<i64>) -> SharingResult<Vec<Comment>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRequestRepository: Send + Sync {
    async fn create(
        &self,
        requestor_id: i64,
        input: CreateItemRequest,
        created: NaiveDateTime,
    ) -> SharingResult<ItemRequest>;

    async fn get_by_id(&self, id: i64) -> SharingResult<Option<ItemRequest>>;

    /// Requests of one user, newest first
    async fn list_by_requestor(&self, requestor_id: i64) -> SharingResult<Vec<ItemRequest>>;

    /// Requests of everybody except `user_id`, newest first
    async fn list_others(&self, user_id: i64, page: Page) -> SharingResult<Vec<ItemRequest>>;
}
