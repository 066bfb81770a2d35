use std::collections::HashMap;
use tracing::instrument;

use super::{require_user, validate};
use crate::Repositories;
use crate::error::{SharingError, SharingResult};
use crate::models::{CreateItemRequest, Item, ItemRequest, ItemRequestResponse, Page, now};

/// Item requests and the items listed in answer to them
#[derive(Clone)]
pub struct ItemRequestService {
    repos: Repositories,
}

impl ItemRequestService {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    #[instrument(skip(self, input))]
    pub async fn create_request(
        &self,
        user_id: i64,
        input: CreateItemRequest,
    ) -> SharingResult<ItemRequestResponse> {
        validate(&input)?;
        require_user(self.repos.users.as_ref(), user_id).await?;

        let request = self.repos.requests.create(user_id, input, now()).await?;
        Ok(ItemRequestResponse::new(request, Vec::new()))
    }

    /// Requests of `user_id`, newest first
    #[instrument(skip(self))]
    pub async fn list_own(&self, user_id: i64) -> SharingResult<Vec<ItemRequestResponse>> {
        require_user(self.repos.users.as_ref(), user_id).await?;

        let requests = self.repos.requests.list_by_requestor(user_id).await?;
        self.with_items(requests).await
    }

    /// Requests of all other users, newest first
    #[instrument(skip(self))]
    pub async fn list_others(
        &self,
        user_id: i64,
        page: Page,
    ) -> SharingResult<Vec<ItemRequestResponse>> {
        require_user(self.repos.users.as_ref(), user_id).await?;

        let requests = self.repos.requests.list_others(user_id, page).await?;
        self.with_items(requests).await
    }

    #[instrument(skip(self))]
    pub async fn get_request(
        &self,
        user_id: i64,
        request_id: i64,
    ) -> SharingResult<ItemRequestResponse> {
        require_user(self.repos.users.as_ref(), user_id).await?;

        let request = self
            .repos
            .requests
            .get_by_id(request_id)
            .await?
            .ok_or(SharingError::RequestNotFound(request_id))?;
        let items = self.repos.items.list_by_requests(vec![request_id]).await?;
        Ok(ItemRequestResponse::new(request, items))
    }

    async fn with_items(
        &self,
        requests: Vec<ItemRequest>,
    ) -> SharingResult<Vec<ItemRequestResponse>> {
        if requests.is_empty() {
            return Ok(Vec::new());
        }

        let request_ids = requests.iter().map(|r| r.id).collect();
        let mut items_by_request: HashMap<i64, Vec<Item>> = HashMap::new();
        for item in self.repos.items.list_by_requests(request_ids).await? {
            if let Some(request_id) = item.request_id {
                items_by_request.entry(request_id).or_default().push(item);
            }
        }

        Ok(requests
            .into_iter()
            .map(|request| {
                let items = items_by_request.remove(&request.id).unwrap_or_default();
                ItemRequestResponse::new(request, items)
            })
            .collect())
    }
}
