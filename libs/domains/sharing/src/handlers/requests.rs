use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    IdPath, SharerUserId, ValidatedJson, ValidatedQuery,
    errors::responses::{
        BadRequestResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::SharingResult;
use crate::models::{CreateItemRequest, Item, ItemRequestResponse, Page, PageQuery};
use crate::service::ItemRequestService;

pub const TAG: &str = "requests";

#[derive(OpenApi)]
#[openapi(
    paths(create_request, list_own_requests, list_other_requests, get_request),
    components(
        schemas(CreateItemRequest, ItemRequestResponse, Item),
        responses(
            NotFoundResponse,
            BadRequestResponse,
            BadRequestValidationResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = TAG, description = "Requests for items nobody offers yet"))
)]
pub struct ApiDoc;

pub fn router(service: ItemRequestService) -> Router {
    Router::new()
        .route("/", get(list_own_requests).post(create_request))
        .route("/all", get(list_other_requests))
        .route("/{id}", get(get_request))
        .with_state(Arc::new(service))
}

/// Ask for an item
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    params(("X-Sharer-User-Id" = i64, Header, description = "Requestor")),
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Request created", body = ItemRequestResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_request(
    State(service): State<Arc<ItemRequestService>>,
    SharerUserId(user_id): SharerUserId,
    ValidatedJson(input): ValidatedJson<CreateItemRequest>,
) -> SharingResult<impl IntoResponse> {
    let request = service.create_request(user_id, input).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// Requests of the acting user with the items offered for them
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(("X-Sharer-User-Id" = i64, Header, description = "Requestor")),
    responses(
        (status = 200, description = "Own requests, newest first", body = Vec<ItemRequestResponse>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_own_requests(
    State(service): State<Arc<ItemRequestService>>,
    SharerUserId(user_id): SharerUserId,
) -> SharingResult<Json<Vec<ItemRequestResponse>>> {
    Ok(Json(service.list_own(user_id).await?))
}

/// Requests of everybody else, paginated
#[utoipa::path(
    get,
    path = "/all",
    tag = TAG,
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Acting user"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Other users' requests, newest first", body = Vec<ItemRequestResponse>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_other_requests(
    State(service): State<Arc<ItemRequestService>>,
    SharerUserId(user_id): SharerUserId,
    ValidatedQuery(query): ValidatedQuery<PageQuery>,
) -> SharingResult<Json<Vec<ItemRequestResponse>>> {
    let page = Page::with_defaults(query)?;
    Ok(Json(service.list_others(user_id, page).await?))
}

/// One request with the items offered for it
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Request ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Acting user")
    ),
    responses(
        (status = 200, description = "Request found", body = ItemRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_request(
    State(service): State<Arc<ItemRequestService>>,
    SharerUserId(user_id): SharerUserId,
    IdPath(id): IdPath,
) -> SharingResult<Json<ItemRequestResponse>> {
    Ok(Json(service.get_request(user_id, id).await?))
}
