use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    IdPath, SharerUserId, ValidatedJson,
    errors::responses::{
        BadRequestResponse, BadRequestUserHeaderResponse, BadRequestValidationResponse,
        ForbiddenResponse, InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::SharingResult;
use crate::models::{
    BookingShort, CommentResponse, CreateComment, CreateItem, Item, ItemOwner, ItemResponse,
    SearchQuery, UpdateItem,
};
use crate::service::ItemService;

pub const TAG: &str = "items";

#[derive(OpenApi)]
#[openapi(
    paths(list_owner_items, create_item, search_items, get_item, update_item, add_comment),
    components(
        schemas(
            Item,
            CreateItem,
            UpdateItem,
            ItemResponse,
            ItemOwner,
            BookingShort,
            CreateComment,
            CommentResponse
        ),
        responses(
            NotFoundResponse,
            ForbiddenResponse,
            BadRequestResponse,
            BadRequestValidationResponse,
            BadRequestUserHeaderResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = TAG, description = "Items offered for sharing and their reviews"))
)]
pub struct ApiDoc;

pub fn router(service: ItemService) -> Router {
    Router::new()
        .route("/", get(list_owner_items).post(create_item))
        .route("/search", get(search_items))
        .route("/{id}", get(get_item).patch(update_item))
        .route("/{id}/comment", post(add_comment))
        .with_state(Arc::new(service))
}

/// Items owned by the acting user, with last/next bookings and comments
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(("X-Sharer-User-Id" = i64, Header, description = "Acting user")),
    responses(
        (status = 200, description = "Owned items", body = Vec<ItemResponse>),
        (status = 400, response = BadRequestUserHeaderResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_owner_items(
    State(service): State<Arc<ItemService>>,
    SharerUserId(user_id): SharerUserId,
) -> SharingResult<Json<Vec<ItemResponse>>> {
    Ok(Json(service.list_owner_items(user_id).await?))
}

/// List an item
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    params(("X-Sharer-User-Id" = i64, Header, description = "Owner of the new item")),
    request_body = CreateItem,
    responses(
        (status = 201, description = "Item created", body = Item),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_item(
    State(service): State<Arc<ItemService>>,
    SharerUserId(user_id): SharerUserId,
    ValidatedJson(input): ValidatedJson<CreateItem>,
) -> SharingResult<impl IntoResponse> {
    let item = service.create_item(user_id, input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Search available items by name or description
#[utoipa::path(
    get,
    path = "/search",
    tag = TAG,
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching available items", body = Vec<Item>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_items(
    State(service): State<Arc<ItemService>>,
    Query(query): Query<SearchQuery>,
) -> SharingResult<Json<Vec<Item>>> {
    Ok(Json(service.search(&query.text).await?))
}

/// Get an item; the owner also sees its last and next booking
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Item ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Acting user")
    ),
    responses(
        (status = 200, description = "Item found", body = ItemResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_item(
    State(service): State<Arc<ItemService>>,
    SharerUserId(user_id): SharerUserId,
    IdPath(id): IdPath,
) -> SharingResult<Json<ItemResponse>> {
    Ok(Json(service.get_item(user_id, id).await?))
}

/// Update name, description or availability of an owned item
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Item ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Owner of the item")
    ),
    request_body = UpdateItem,
    responses(
        (status = 200, description = "Item updated", body = Item),
        (status = 400, response = BadRequestValidationResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_item(
    State(service): State<Arc<ItemService>>,
    SharerUserId(user_id): SharerUserId,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateItem>,
) -> SharingResult<Json<Item>> {
    Ok(Json(service.update_item(user_id, id, input).await?))
}

/// Review an item after a completed booking
#[utoipa::path(
    post,
    path = "/{id}/comment",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Item ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Author")
    ),
    request_body = CreateComment,
    responses(
        (status = 200, description = "Comment added", body = CommentResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_comment(
    State(service): State<Arc<ItemService>>,
    SharerUserId(user_id): SharerUserId,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<CreateComment>,
) -> SharingResult<Json<CommentResponse>> {
    Ok(Json(service.add_comment(user_id, id, input).await?))
}
