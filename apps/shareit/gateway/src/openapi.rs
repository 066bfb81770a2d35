use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "ShareIt Gateway",
        version = "0.1.0",
        description = "Validates ShareIt requests and forwards them to the server"
    ),
    nest(
        (path = "/users", api = crate::api::users::ApiDoc),
        (path = "/items", api = crate::api::items::ApiDoc),
        (path = "/bookings", api = crate::api::bookings::ApiDoc),
        (path = "/requests", api = crate::api::requests::ApiDoc)
    )
)]
pub struct ApiDoc;
