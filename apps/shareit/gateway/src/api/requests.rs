use axum::{
    Router,
    extract::{OriginalUri, State},
    http::Method,
    response::Response,
    routing::get,
};
use axum_helpers::{
    AppError, IdPath, SharerUserId, ValidatedJson, ValidatedQuery,
    errors::responses::{
        BadRequestUserHeaderResponse, BadRequestValidationResponse, ServiceUnavailableResponse,
    },
};
use utoipa::OpenApi;

use crate::client::ServerClient;
use crate::dto::{CreateItemRequest, PageQuery};

pub const TAG: &str = "requests";

#[derive(OpenApi)]
#[openapi(
    paths(create_request, list_own_requests, list_other_requests, get_request),
    components(
        schemas(CreateItemRequest),
        responses(
            BadRequestValidationResponse,
            BadRequestUserHeaderResponse,
            ServiceUnavailableResponse
        )
    ),
    tags((name = TAG, description = "Requests for items nobody offers yet"))
)]
pub struct ApiDoc;

pub fn router(client: ServerClient) -> Router {
    Router::new()
        .route("/", get(list_own_requests).post(create_request))
        .route("/all", get(list_other_requests))
        .route("/{id}", get(get_request))
        .with_state(client)
}

/// Ask for an item
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    params(("X-Sharer-User-Id" = i64, Header, description = "Requestor")),
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Relayed from the server"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn create_request(
    State(client): State<ServerClient>,
    OriginalUri(uri): OriginalUri,
    SharerUserId(user_id): SharerUserId,
    ValidatedJson(input): ValidatedJson<CreateItemRequest>,
) -> Result<Response, AppError> {
    client.send_json(Method::POST, &uri, Some(user_id), &input).await
}

/// Requests made by the acting user
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(("X-Sharer-User-Id" = i64, Header, description = "Requestor")),
    responses(
        (status = 200, description = "Relayed from the server"),
        (status = 400, response = BadRequestUserHeaderResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn list_own_requests(
    State(client): State<ServerClient>,
    OriginalUri(uri): OriginalUri,
    SharerUserId(user_id): SharerUserId,
) -> Result<Response, AppError> {
    client.send(Method::GET, &uri, Some(user_id)).await
}

/// Requests made by everyone else, one page at a time
#[utoipa::path(
    get,
    path = "/all",
    tag = TAG,
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Acting user"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Relayed from the server"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn list_other_requests(
    State(client): State<ServerClient>,
    OriginalUri(uri): OriginalUri,
    SharerUserId(user_id): SharerUserId,
    ValidatedQuery(_query): ValidatedQuery<PageQuery>,
) -> Result<Response, AppError> {
    client.send(Method::GET, &uri, Some(user_id)).await
}

/// Get a request with the items offered for it
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Request ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Acting user")
    ),
    responses(
        (status = 200, description = "Relayed from the server"),
        (status = 400, response = BadRequestUserHeaderResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn get_request(
    State(client): State<ServerClient>,
    OriginalUri(uri): OriginalUri,
    _: IdPath,
    SharerUserId(user_id): SharerUserId,
) -> Result<Response, AppError> {
    client.send(Method::GET, &uri, Some(user_id)).await
}
