use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "ShareIt Server",
        version = "0.1.0",
        description = "Users, items, bookings, comments and item requests of ShareIt"
    ),
    nest(
        (path = "/users", api = domain_users::ApiDoc),
        (path = "/items", api = domain_sharing::handlers::items::ApiDoc),
        (path = "/bookings", api = domain_sharing::handlers::bookings::ApiDoc),
        (path = "/requests", api = domain_sharing::handlers::requests::ApiDoc)
    )
)]
pub struct ApiDoc;
