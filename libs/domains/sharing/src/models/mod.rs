//! Wire and domain types for items, bookings, comments and item requests.

mod booking;
mod comment;
mod item;
mod page;
mod request;

pub use booking::{
    ApproveQuery, Booking, BookingItem, BookingListQuery, BookingResponse, BookingShort,
    BookingState, BookingStatus, CreateBooking,
};
pub use comment::{Comment, CommentResponse, CreateComment, NewComment};
pub use item::{CreateItem, Item, ItemOwner, ItemResponse, SearchQuery, UpdateItem};
pub use page::{DEFAULT_PAGE_SIZE, Page, PageQuery};
pub use request::{CreateItemRequest, ItemRequest, ItemRequestResponse};

use chrono::{Local, NaiveDateTime, SubsecRound};

/// Current local wall-clock time at microsecond precision, matching what
/// PostgreSQL stores in a `timestamp` column.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(6)
}
