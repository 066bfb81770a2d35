use std::collections::HashMap;
use tracing::instrument;

use super::require_user;
use crate::Repositories;
use crate::error::{SharingError, SharingResult};
use crate::models::{
    Booking, BookingItem, BookingResponse, BookingState, BookingStatus, CreateBooking, Item, Page,
    now,
};
use crate::repository::BookingFilter;

/// Reservation workflow: request, decide, inspect
#[derive(Clone)]
pub struct BookingService {
    repos: Repositories,
}

impl BookingService {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    /// Request an available item for `[start, end)`; the booking starts WAITING
    #[instrument(skip(self, input), fields(item_id = input.item_id))]
    pub async fn create_booking(
        &self,
        user_id: i64,
        input: CreateBooking,
    ) -> SharingResult<BookingResponse> {
        if input.end <= input.start {
            return Err(SharingError::InvalidBookingPeriod);
        }
        let booker = require_user(self.repos.users.as_ref(), user_id).await?;
        let item = self.find_item(input.item_id).await?;
        if !item.available {
            return Err(SharingError::ItemUnavailable(item.id));
        }

        let booking = self.repos.bookings.create(user_id, input).await?;
        Ok(response(booking, &item, booker))
    }

    /// Owner decision on a WAITING booking. Approval takes the item off the shelf.
    #[instrument(skip(self))]
    pub async fn decide(
        &self,
        user_id: i64,
        booking_id: i64,
        approved: bool,
    ) -> SharingResult<BookingResponse> {
        let booking = self.find_booking(booking_id).await?;
        let item = self.find_item(booking.item_id).await?;
        if item.owner_id != user_id {
            return Err(SharingError::NotItemOwner {
                user_id,
                item_id: item.id,
            });
        }

        let status = if approved {
            BookingStatus::Approved
        } else {
            BookingStatus::Rejected
        };
        let booking = self.repos.bookings.decide(booking_id, status).await?;

        let booker = require_user(self.repos.users.as_ref(), booking.booker_id).await?;
        let item = Item {
            available: item.available && !approved,
            ..item
        };
        Ok(response(booking, &item, booker))
    }

    /// Visible to the booker and to the item owner only
    #[instrument(skip(self))]
    pub async fn get_booking(
        &self,
        user_id: i64,
        booking_id: i64,
    ) -> SharingResult<BookingResponse> {
        require_user(self.repos.users.as_ref(), user_id).await?;
        let booking = self.find_booking(booking_id).await?;
        let item = self.find_item(booking.item_id).await?;
        if booking.booker_id != user_id && item.owner_id != user_id {
            return Err(SharingError::BookingAccessDenied {
                user_id,
                booking_id,
            });
        }

        let booker = require_user(self.repos.users.as_ref(), booking.booker_id).await?;
        Ok(response(booking, &item, booker))
    }

    /// Bookings made by `user_id`
    #[instrument(skip(self))]
    pub async fn list_for_booker(
        &self,
        user_id: i64,
        state: BookingState,
        page: Option<Page>,
    ) -> SharingResult<Vec<BookingResponse>> {
        require_user(self.repos.users.as_ref(), user_id).await?;

        let filter = BookingFilter::by_booker(user_id, state, now()).with_page(page);
        let bookings = self.repos.bookings.list(filter).await?;
        self.responses(bookings).await
    }

    /// Bookings of items owned by `user_id`
    #[instrument(skip(self))]
    pub async fn list_for_owner(
        &self,
        user_id: i64,
        state: BookingState,
        page: Option<Page>,
    ) -> SharingResult<Vec<BookingResponse>> {
        require_user(self.repos.users.as_ref(), user_id).await?;

        let item_ids = self
            .repos
            .items
            .list_by_owner(user_id)
            .await?
            .into_iter()
            .map(|i| i.id)
            .collect();
        let filter = BookingFilter::by_items(item_ids, state, now()).with_page(page);
        let bookings = self.repos.bookings.list(filter).await?;
        self.responses(bookings).await
    }

    async fn find_item(&self, item_id: i64) -> SharingResult<Item> {
        self.repos
            .items
            .get_by_id(item_id)
            .await?
            .ok_or(SharingError::ItemNotFound(item_id))
    }

    async fn find_booking(&self, booking_id: i64) -> SharingResult<Booking> {
        self.repos
            .bookings
            .get_by_id(booking_id)
            .await?
            .ok_or(SharingError::BookingNotFound(booking_id))
    }

    /// Resolve items and bookers for a list, keeping its order
    async fn responses(&self, bookings: Vec<Booking>) -> SharingResult<Vec<BookingResponse>> {
        if bookings.is_empty() {
            return Ok(Vec::new());
        }

        let mut item_ids: Vec<i64> = bookings.iter().map(|b| b.item_id).collect();
        item_ids.sort_unstable();
        item_ids.dedup();
        let mut booker_ids: Vec<i64> = bookings.iter().map(|b| b.booker_id).collect();
        booker_ids.sort_unstable();
        booker_ids.dedup();

        let items: HashMap<i64, Item> = self
            .repos
            .items
            .list_by_ids(item_ids)
            .await?
            .into_iter()
            .map(|i| (i.id, i))
            .collect();
        let bookers: HashMap<_, _> = self
            .repos
            .users
            .list_by_ids(booker_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        bookings
            .into_iter()
            .map(|booking| {
                let item = items
                    .get(&booking.item_id)
                    .ok_or(SharingError::ItemNotFound(booking.item_id))?;
                let booker = bookers
                    .get(&booking.booker_id)
                    .cloned()
                    .ok_or(SharingError::UserNotFound(booking.booker_id))?;
                Ok(response(booking, item, booker))
            })
            .collect()
    }
}

fn response(booking: Booking, item: &Item, booker: domain_users::User) -> BookingResponse {
    BookingResponse {
        id: booking.id,
        start: booking.start,
        end: booking.end,
        status: booking.status,
        item: BookingItem {
            id: item.id,
            name: item.name.clone(),
        },
        booker,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::test_support::{Mocks, user};
    use chrono::Duration;
    use mockall::predicate::eq;

    fn item(available: bool) -> Item {
        Item {
            id: 10,
            name: "Drill".into(),
            description: "Cordless".into(),
            available,
            owner_id: 1,
            request_id: None,
        }
    }

    fn waiting() -> Booking {
        let start = now() + Duration::days(1);
        Booking {
            id: 5,
            start,
            end: start + Duration::days(1),
            item_id: 10,
            booker_id: 2,
            status: BookingStatus::Waiting,
        }
    }

    fn create_input() -> CreateBooking {
        let booking = waiting();
        CreateBooking {
            item_id: 10,
            start: booking.start,
            end: booking.end,
        }
    }

    #[tokio::test]
    async fn test_create_rejects_inverted_period_before_lookups() {
        let mut mocks = Mocks::default();
        mocks.items.expect_get_by_id().never();

        let service = BookingService::new(mocks.into_repositories().await);
        let input = create_input();
        let err = service
            .create_booking(
                2,
                CreateBooking {
                    start: input.end,
                    end: input.start,
                    ..input
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, SharingError::InvalidBookingPeriod));
    }

    #[tokio::test]
    async fn test_create_rejects_unavailable_item() {
        let mut mocks = Mocks {
            users: vec!["Ann", "Bob"],
            ..Default::default()
        };
        mocks
            .items
            .expect_get_by_id()
            .with(eq(10))
            .returning(|_| Ok(Some(item(false))));
        mocks.bookings.expect_create().never();

        let service = BookingService::new(mocks.into_repositories().await);
        let err = service.create_booking(2, create_input()).await.unwrap_err();

        assert!(matches!(err, SharingError::ItemUnavailable(10)));
    }

    #[tokio::test]
    async fn test_create_booking_is_waiting() {
        let mut mocks = Mocks {
            users: vec!["Ann", "Bob"],
            ..Default::default()
        };
        mocks
            .items
            .expect_get_by_id()
            .returning(|_| Ok(Some(item(true))));
        mocks
            .bookings
            .expect_create()
            .withf(|booker, input| *booker == 2 && input.item_id == 10)
            .returning(|_, _| Ok(waiting()));

        let service = BookingService::new(mocks.into_repositories().await);
        let response = service.create_booking(2, create_input()).await.unwrap();

        assert_eq!(response.status, BookingStatus::Waiting);
        assert_eq!(response.booker, user(2, "Bob"));
        assert_eq!(response.item.name, "Drill");
    }

    fn owner_view(mocks: &mut Mocks) {
        mocks
            .bookings
            .expect_get_by_id()
            .returning(|_| Ok(Some(waiting())));
        mocks
            .items
            .expect_get_by_id()
            .returning(|_| Ok(Some(item(true))));
    }

    #[tokio::test]
    async fn test_approve_reports_item_unavailable() {
        let mut mocks = Mocks {
            users: vec!["Ann", "Bob"],
            ..Default::default()
        };
        owner_view(&mut mocks);
        mocks
            .bookings
            .expect_decide()
            .with(eq(5), eq(BookingStatus::Approved))
            .times(1)
            .returning(|_, status| {
                Ok(Booking {
                    status,
                    ..waiting()
                })
            });

        let service = BookingService::new(mocks.into_repositories().await);
        let response = service.decide(1, 5, true).await.unwrap();

        assert_eq!(response.status, BookingStatus::Approved);
        assert_eq!(response.booker, user(2, "Bob"));
    }

    #[tokio::test]
    async fn test_reject_asks_for_rejected_status() {
        let mut mocks = Mocks {
            users: vec!["Ann", "Bob"],
            ..Default::default()
        };
        owner_view(&mut mocks);
        mocks
            .bookings
            .expect_decide()
            .with(eq(5), eq(BookingStatus::Rejected))
            .times(1)
            .returning(|_, status| {
                Ok(Booking {
                    status,
                    ..waiting()
                })
            });

        let service = BookingService::new(mocks.into_repositories().await);
        let response = service.decide(1, 5, false).await.unwrap();

        assert_eq!(response.status, BookingStatus::Rejected);
    }

    #[tokio::test]
    async fn test_lost_decision_race_is_reported() {
        let mut mocks = Mocks::default();
        // The booking was still WAITING when read; another decision landed first
        owner_view(&mut mocks);
        mocks.bookings.expect_decide().returning(|id, _| {
            Err(SharingError::AlreadyDecided {
                booking_id: id,
                status: BookingStatus::Approved,
            })
        });

        let service = BookingService::new(mocks.into_repositories().await);
        let err = service.decide(1, 5, false).await.unwrap_err();

        assert!(matches!(
            err,
            SharingError::AlreadyDecided {
                booking_id: 5,
                status: BookingStatus::Approved
            }
        ));
    }

    #[tokio::test]
    async fn test_decide_by_non_owner_is_forbidden() {
        let mut mocks = Mocks::default();
        mocks
            .bookings
            .expect_get_by_id()
            .returning(|_| Ok(Some(waiting())));
        mocks
            .items
            .expect_get_by_id()
            .returning(|_| Ok(Some(item(true))));

        mocks.bookings.expect_decide().never();

        let service = BookingService::new(mocks.into_repositories().await);
        let err = service.decide(2, 5, true).await.unwrap_err();

        assert!(matches!(err, SharingError::NotItemOwner { .. }));
    }

    #[tokio::test]
    async fn test_stranger_cannot_view_booking() {
        let mut mocks = Mocks {
            users: vec!["Ann", "Bob", "Eve"],
            ..Default::default()
        };
        mocks
            .bookings
            .expect_get_by_id()
            .returning(|_| Ok(Some(waiting())));
        mocks
            .items
            .expect_get_by_id()
            .returning(|_| Ok(Some(item(true))));

        let service = BookingService::new(mocks.into_repositories().await);
        let err = service.get_booking(3, 5).await.unwrap_err();

        assert!(matches!(
            err,
            SharingError::BookingAccessDenied {
                user_id: 3,
                booking_id: 5
            }
        ));
    }

    #[tokio::test]
    async fn test_owner_list_filters_by_owned_items() {
        let mut mocks = Mocks {
            users: vec!["Ann", "Bob"],
            ..Default::default()
        };
        mocks
            .items
            .expect_list_by_owner()
            .with(eq(1))
            .returning(|_| Ok(vec![item(true)]));
        mocks
            .bookings
            .expect_list()
            .withf(|filter| {
                filter.item_ids == Some(vec![10])
                    && filter.booker_id.is_none()
                    && filter.state == BookingState::Waiting
            })
            .returning(|_| Ok(vec![waiting()]));
        mocks
            .items
            .expect_list_by_ids()
            .returning(|_| Ok(vec![item(true)]));

        let service = BookingService::new(mocks.into_repositories().await);
        let bookings = service
            .list_for_owner(1, BookingState::Waiting, None)
            .await
            .unwrap();

        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].booker.name, "Bob");
    }
}
