use chrono::NaiveDateTime;
use std::collections::HashMap;
use tracing::instrument;

use super::{require_user, validate};
use crate::Repositories;
use crate::error::{SharingError, SharingResult};
use crate::models::{
    Booking, BookingShort, CommentResponse, CreateComment, CreateItem, Item, ItemOwner,
    ItemResponse, NewComment, UpdateItem, now,
};

/// Listing, editing, searching and reviewing items
#[derive(Clone)]
pub struct ItemService {
    repos: Repositories,
}

impl ItemService {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    /// List an item on behalf of `user_id`, optionally answering a request
    #[instrument(skip(self, input))]
    pub async fn create_item(&self, user_id: i64, input: CreateItem) -> SharingResult<Item> {
        validate(&input)?;
        require_user(self.repos.users.as_ref(), user_id).await?;

        if let Some(request_id) = input.request_id {
            if self.repos.requests.get_by_id(request_id).await?.is_none() {
                return Err(SharingError::RequestNotFound(request_id));
            }
        }

        self.repos.items.create(user_id, input).await
    }

    /// Partial update; only the owner may change an item
    #[instrument(skip(self, input))]
    pub async fn update_item(
        &self,
        user_id: i64,
        item_id: i64,
        input: UpdateItem,
    ) -> SharingResult<Item> {
        validate(&input)?;
        require_user(self.repos.users.as_ref(), user_id).await?;

        let item = self.find_item(item_id).await?;
        if item.owner_id != user_id {
            return Err(SharingError::NotItemOwner { user_id, item_id });
        }

        self.repos.items.update(item_id, input).await
    }

    /// One item with its comments, plus last/next booking when `user_id` owns it
    #[instrument(skip(self))]
    pub async fn get_item(&self, user_id: i64, item_id: i64) -> SharingResult<ItemResponse> {
        let item = self.find_item(item_id).await?;
        let is_owner = item.owner_id == user_id;

        let mut responses = self.assemble(vec![item], is_owner).await?;
        responses
            .pop()
            .ok_or_else(|| SharingError::Internal(format!("item {item_id} vanished")))
    }

    /// Every item of `user_id` in owner view, ordered by id
    #[instrument(skip(self))]
    pub async fn list_owner_items(&self, user_id: i64) -> SharingResult<Vec<ItemResponse>> {
        require_user(self.repos.users.as_ref(), user_id).await?;

        let items = self.repos.items.list_by_owner(user_id).await?;
        self.assemble(items, true).await
    }

    /// Available items mentioning `text`; blank text finds nothing
    #[instrument(skip(self))]
    pub async fn search(&self, text: &str) -> SharingResult<Vec<Item>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        self.repos.items.search(text).await
    }

    /// Review an item the author has borrowed and returned
    #[instrument(skip(self, input))]
    pub async fn add_comment(
        &self,
        user_id: i64,
        item_id: i64,
        input: CreateComment,
    ) -> SharingResult<CommentResponse> {
        validate(&input)?;
        self.find_item(item_id).await?;
        let author = require_user(self.repos.users.as_ref(), user_id).await?;

        let now = now();
        if !self
            .repos
            .bookings
            .has_finished_booking(user_id, item_id, now)
            .await?
        {
            return Err(SharingError::CommentNotAllowed { user_id, item_id });
        }

        let comment = self
            .repos
            .comments
            .create(NewComment {
                text: input.text,
                item_id,
                author_id: user_id,
                created: now,
            })
            .await?;

        Ok(CommentResponse::new(comment, author.name))
    }

    async fn find_item(&self, item_id: i64) -> SharingResult<Item> {
        self.repos
            .items
            .get_by_id(item_id)
            .await?
            .ok_or(SharingError::ItemNotFound(item_id))
    }

    /// Resolve owners and comments for a batch of items, and with
    /// `owner_view` also their last/next approved bookings.
    async fn assemble(
        &self,
        items: Vec<Item>,
        owner_view: bool,
    ) -> SharingResult<Vec<ItemResponse>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let item_ids: Vec<i64> = items.iter().map(|i| i.id).collect();
        let comments = self.repos.comments.list_by_items(item_ids.clone()).await?;

        let mut user_ids: Vec<i64> = items
            .iter()
            .map(|i| i.owner_id)
            .chain(comments.iter().map(|c| c.author_id))
            .collect();
        user_ids.sort_unstable();
        user_ids.dedup();
        let names: HashMap<i64, String> = self
            .repos
            .users
            .list_by_ids(user_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u.name))
            .collect();

        let mut comments_by_item: HashMap<i64, Vec<CommentResponse>> = HashMap::new();
        for comment in comments {
            // Comments of removed authors are dropped.
            if let Some(name) = names.get(&comment.author_id) {
                comments_by_item
                    .entry(comment.item_id)
                    .or_default()
                    .push(CommentResponse::new(comment, name.clone()));
            }
        }

        let mut bookings_by_item: HashMap<i64, Vec<Booking>> = HashMap::new();
        if owner_view {
            for booking in self.repos.bookings.list_approved_for_items(item_ids).await? {
                bookings_by_item
                    .entry(booking.item_id)
                    .or_default()
                    .push(booking);
            }
        }

        let now = now();
        items
            .into_iter()
            .map(|item| {
                let owner_name = names
                    .get(&item.owner_id)
                    .cloned()
                    .ok_or(SharingError::UserNotFound(item.owner_id))?;
                let owner = ItemOwner {
                    id: item.owner_id,
                    name: owner_name,
                };

                let item_id = item.id;
                let mut response = ItemResponse::new(item, owner);
                response.comments = comments_by_item.remove(&item_id).unwrap_or_default();
                if let Some(bookings) = bookings_by_item.get(&item_id) {
                    let (last, next) = last_and_next(bookings, now);
                    response.last_booking = last;
                    response.next_booking = next;
                }
                Ok(response)
            })
            .collect()
    }
}

/// `last`: started at or before `now`, latest end. `next`: earliest future start.
fn last_and_next(
    bookings: &[Booking],
    now: NaiveDateTime,
) -> (Option<BookingShort>, Option<BookingShort>) {
    let last = bookings
        .iter()
        .filter(|b| b.start <= now)
        .max_by_key(|b| b.end)
        .map(BookingShort::from);
    let next = bookings
        .iter()
        .filter(|b| b.start > now)
        .min_by_key(|b| b.start)
        .map(BookingShort::from);
    (last, next)
}
