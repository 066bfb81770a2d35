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
        BadRequestResponse, BadRequestUserHeaderResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::SharingResult;
use crate::models::{
    ApproveQuery, BookingItem, BookingListQuery, BookingResponse, BookingState, BookingStatus,
    CreateBooking, Page,
};
use crate::service::BookingService;

pub const TAG: &str = "bookings";

#[derive(OpenApi)]
#[openapi(
    paths(create_booking, list_booker_bookings, list_owner_bookings, get_booking, decide_booking),
    components(
        schemas(CreateBooking, BookingResponse, BookingItem, BookingStatus, BookingState),
        responses(
            NotFoundResponse,
            ForbiddenResponse,
            BadRequestResponse,
            BadRequestUserHeaderResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = TAG, description = "Booking requests and owner decisions"))
)]
pub struct ApiDoc;

pub fn router(service: BookingService) -> Router {
    Router::new()
        .route("/", get(list_booker_bookings).post(create_booking))
        .route("/owner", get(list_owner_bookings))
        .route("/{id}", get(get_booking).patch(decide_booking))
        .with_state(Arc::new(service))
}

/// Book an available item
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    params(("X-Sharer-User-Id" = i64, Header, description = "Booker")),
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Booking created in WAITING state", body = BookingResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_booking(
    State(service): State<Arc<BookingService>>,
    SharerUserId(user_id): SharerUserId,
    ValidatedJson(input): ValidatedJson<CreateBooking>,
) -> SharingResult<impl IntoResponse> {
    let booking = service.create_booking(user_id, input).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// Bookings made by the acting user, newest start first
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Booker"),
        BookingListQuery
    ),
    responses(
        (status = 200, description = "Bookings", body = Vec<BookingResponse>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_booker_bookings(
    State(service): State<Arc<BookingService>>,
    SharerUserId(user_id): SharerUserId,
    ValidatedQuery(query): ValidatedQuery<BookingListQuery>,
) -> SharingResult<Json<Vec<BookingResponse>>> {
    let state = BookingState::parse(query.state.as_deref())?;
    let page = Page::optional(query.page())?;
    Ok(Json(service.list_for_booker(user_id, state, page).await?))
}

/// Bookings of items owned by the acting user, newest start first
#[utoipa::path(
    get,
    path = "/owner",
    tag = TAG,
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Item owner"),
        BookingListQuery
    ),
    responses(
        (status = 200, description = "Bookings", body = Vec<BookingResponse>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_owner_bookings(
    State(service): State<Arc<BookingService>>,
    SharerUserId(user_id): SharerUserId,
    ValidatedQuery(query): ValidatedQuery<BookingListQuery>,
) -> SharingResult<Json<Vec<BookingResponse>>> {
    let state = BookingState::parse(query.state.as_deref())?;
    let page = Page::optional(query.page())?;
    Ok(Json(service.list_for_owner(user_id, state, page).await?))
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
        (status = 200, description = "Booking found", body = BookingResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_booking(
    State(service): State<Arc<BookingService>>,
    SharerUserId(user_id): SharerUserId,
    IdPath(id): IdPath,
) -> SharingResult<Json<BookingResponse>> {
    Ok(Json(service.get_booking(user_id, id).await?))
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
        (status = 200, description = "Booking decided", body = BookingResponse),
        (status = 400, response = BadRequestResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn decide_booking(
    State(service): State<Arc<BookingService>>,
    SharerUserId(user_id): SharerUserId,
    IdPath(id): IdPath,
    ValidatedQuery(query): ValidatedQuery<ApproveQuery>,
) -> SharingResult<Json<BookingResponse>> {
    Ok(Json(service.decide(user_id, id, query.approved).await?))
}
