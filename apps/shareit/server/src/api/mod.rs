use axum::Router;
use domain_sharing::{BookingService, ItemRequestService, ItemService, Repositories, handlers};
use domain_users::UserService;

pub mod health;

/// All resource routes, mounted at the root.
///
/// Every service reads from the same [`Repositories`], so users created
/// through `/users` are visible to items, bookings and requests.
pub fn routes(repos: &Repositories) -> Router {
    Router::new()
        .nest(
            "/users",
            domain_users::handlers::router(UserService::new(repos.users.clone())),
        )
        .nest(
            "/items",
            handlers::items::router(ItemService::new(repos.clone())),
        )
        .nest(
            "/bookings",
            handlers::bookings::router(BookingService::new(repos.clone())),
        )
        .nest(
            "/requests",
            handlers::requests::router(ItemRequestService::new(repos.clone())),
        )
}

/// `GET /ready`, checking the database connection.
///
/// Carries its own state so it can be merged into the stateless app router.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
