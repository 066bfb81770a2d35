use axum::{
    Router,
    extract::{OriginalUri, Query, State},
    http::Method,
    response::Response,
    routing::{get, post},
};
use axum_helpers::{
    AppError, IdPath, SharerUserId, ValidatedJson,
    errors::responses::{
        BadRequestUserHeaderResponse, BadRequestValidationResponse, ServiceUnavailableResponse,
    },
};
use utoipa::OpenApi;

use crate::client::ServerClient;
use crate::dto::{CreateComment, CreateItem, SearchQuery, UpdateItem};

pub const TAG: &str = "items";

#[derive(OpenApi)]
#[openapi(
    paths(list_items, create_item, search_items, get_item, update_item, add_comment),
    components(
        schemas(CreateItem, UpdateItem, CreateComment),
        responses(
            BadRequestValidationResponse,
            BadRequestUserHeaderResponse,
            ServiceUnavailableResponse
        )
    ),
    tags((name = TAG, description = "Items offered for sharing and their comments"))
)]
pub struct ApiDoc;

pub fn router(client: ServerClient) -> Router {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/search", get(search_items))
        .route("/{id}", get(get_item).patch(update_item))
        .route("/{id}/comment", post(add_comment))
        .with_state(client)
}

/// Items owned by the acting user
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(("X-Sharer-User-Id" = i64, Header, description = "Owner")),
    responses(
        (status = 200, description = "Relayed from the server"),
        (status = 400, response = BadRequestUserHeaderResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn list_items(
    State(client): State<ServerClient>,
    OriginalUri(uri): OriginalUri,
    SharerUserId(user_id): SharerUserId,
) -> Result<Response, AppError> {
    client.send(Method::GET, &uri, Some(user_id)).await
}

/// Offer an item
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    params(("X-Sharer-User-Id" = i64, Header, description = "Owner")),
    request_body = CreateItem,
    responses(
        (status = 201, description = "Relayed from the server"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn create_item(
    State(client): State<ServerClient>,
    OriginalUri(uri): OriginalUri,
    SharerUserId(user_id): SharerUserId,
    ValidatedJson(input): ValidatedJson<CreateItem>,
) -> Result<Response, AppError> {
    client.send_json(Method::POST, &uri, Some(user_id), &input).await
}

/// Search available items by name or description
#[utoipa::path(
    get,
    path = "/search",
    tag = TAG,
    params(SearchQuery),
    responses(
        (status = 200, description = "Relayed from the server"),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn search_items(
    State(client): State<ServerClient>,
    OriginalUri(uri): OriginalUri,
    Query(_query): Query<SearchQuery>,
) -> Result<Response, AppError> {
    client.send(Method::GET, &uri, None).await
}

/// Get an item with its comments
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Item ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Acting user")
    ),
    responses(
        (status = 200, description = "Relayed from the server"),
        (status = 400, response = BadRequestUserHeaderResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn get_item(
    State(client): State<ServerClient>,
    OriginalUri(uri): OriginalUri,
    _: IdPath,
    SharerUserId(user_id): SharerUserId,
) -> Result<Response, AppError> {
    client.send(Method::GET, &uri, Some(user_id)).await
}

/// Update an item's name, description or availability
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Item ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Owner")
    ),
    request_body = UpdateItem,
    responses(
        (status = 200, description = "Relayed from the server"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn update_item(
    State(client): State<ServerClient>,
    OriginalUri(uri): OriginalUri,
    _: IdPath,
    SharerUserId(user_id): SharerUserId,
    ValidatedJson(input): ValidatedJson<UpdateItem>,
) -> Result<Response, AppError> {
    client.send_json(Method::PATCH, &uri, Some(user_id), &input).await
}

/// Comment on an item the acting user has finished booking
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
        (status = 200, description = "Relayed from the server"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn add_comment(
    State(client): State<ServerClient>,
    OriginalUri(uri): OriginalUri,
    _: IdPath,
    SharerUserId(user_id): SharerUserId,
    ValidatedJson(input): ValidatedJson<CreateComment>,
) -> Result<Response, AppError> {
    client.send_json(Method::POST, &uri, Some(user_id), &input).await
}
