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
use crate::dto::{ApproveQuery, BookingListQuery, CreateBooking};

pub const TAG: &str = "bookings";

#[derive(OpenApi)]
#[openapi(
    paths(create_booking, list_booker_bookings, list_owner_bookings, get_booking, decide_booking),
    components(
        schemas(CreateBooking),
        responses(
            BadRequestValidationResponse,
            BadRequestUserHeaderResponse,
            ServiceUnavailableResponse
        )
    ),
    tags((name = TAG, description = "Booking requests and owner decisions"))
)]
pub struct ApiDoc;

pub fn router(client: ServerClient) -> Router {
    Router::new()
        .route("/", get(list_booker_bookings).post(create_booking))
        .route("/owner", get(list_owner_bookings))
        .route("/{id}", get(get_booking).patch(decide_booking))
        .with_state(client)
}

/// Book an item for a future period
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    params(("X-Sharer-User-Id" = i64, Header, description = "Booker")),
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Relayed from the server"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn create_booking(
    State(client): State<ServerClient>,
    OriginalUri(uri): OriginalUri,
    SharerUserId(user_id): SharerUserId,
    ValidatedJson(input): ValidatedJson<CreateBooking>,
) -> Result<Response, AppError> {
    client.send_json(Method::POST, &uri, Some(user_id), &input).await
}

/// Bookings made by the acting user
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Booker"),
        BookingListQuery
    ),
    responses(
        (status = 200, description = "Relayed from the server"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn list_booker_bookings(
    State(client): State<ServerClient>,
    OriginalUri(uri): OriginalUri,
    SharerUserId(user_id): SharerUserId,
    ValidatedQuery(query): ValidatedQuery<BookingListQuery>,
) -> Result<Response, AppError> {
    query.check_state()?;
    client.send(Method::GET, &uri, Some(user_id)).await
}

/// Bookings of items owned by the acting user
#[utoipa::path(
    get,
    path = "/owner",
    tag = TAG,
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Item owner"),
        BookingListQuery
    ),
    responses(
        (status = 200, description = "Relayed from the server"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn list_owner_bookings(
    State(client): State<ServerClient>,
    OriginalUri(uri): OriginalUri,
    SharerUserId(user_id): SharerUserId,
    ValidatedQuery(query): ValidatedQuery<BookingListQuery>,
) -> Result<Response, AppError> {
    query.check_state()?;
    client.send(Method::GET, &uri, Some(user_id)).await
}

/// Get a booking as its booker or as the item owner
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Booking ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Booker or item owner")
    ),
    responses(
        (status = 200, description = "Relayed from the server"),
        (status = 400, response = BadRequestUserHeaderResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn get_booking(
    State(client): State<ServerClient>,
    OriginalUri(uri): OriginalUri,
    _: IdPath,
    SharerUserId(user_id): SharerUserId,
) -> Result<Response, AppError> {
    client.send(Method::GET, &uri, Some(user_id)).await
}

/// Approve or reject a waiting booking
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Booking ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Item owner"),
        ApproveQuery
    ),
    responses(
        (status = 200, description = "Relayed from the server"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn decide_booking(
    State(client): State<ServerClient>,
    OriginalUri(uri): OriginalUri,
    _: IdPath,
    SharerUserId(user_id): SharerUserId,
    ValidatedQuery(_query): ValidatedQuery<ApproveQuery>,
) -> Result<Response, AppError> {
    client.send(Method::PATCH, &uri, Some(user_id)).await
}
