use axum::{
    Router,
    extract::{OriginalUri, State},
    http::Method,
    response::Response,
    routing::get,
};
use axum_helpers::{
    AppError, IdPath, ValidatedJson,
    errors::responses::{BadRequestValidationResponse, ServiceUnavailableResponse},
};
use utoipa::OpenApi;

use crate::client::ServerClient;
use crate::dto::{CreateUser, UpdateUser};

pub const TAG: &str = "users";

#[derive(OpenApi)]
#[openapi(
    paths(list_users, create_user, get_user, update_user, delete_user),
    components(
        schemas(CreateUser, UpdateUser),
        responses(BadRequestValidationResponse, ServiceUnavailableResponse)
    ),
    tags((name = TAG, description = "User registration"))
)]
pub struct ApiDoc;

pub fn router(client: ServerClient) -> Router {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).patch(update_user).delete(delete_user))
        .with_state(client)
}

/// List users
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "Relayed from the server"),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn list_users(
    State(client): State<ServerClient>,
    OriginalUri(uri): OriginalUri,
) -> Result<Response, AppError> {
    client.send(Method::GET, &uri, None).await
}

/// Register a user
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateUser,
    responses(
        (status = 201, description = "Relayed from the server"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn create_user(
    State(client): State<ServerClient>,
    OriginalUri(uri): OriginalUri,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> Result<Response, AppError> {
    client.send_json(Method::POST, &uri, None, &input).await
}

/// Get a user
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "Relayed from the server"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn get_user(
    State(client): State<ServerClient>,
    OriginalUri(uri): OriginalUri,
    _: IdPath,
) -> Result<Response, AppError> {
    client.send(Method::GET, &uri, None).await
}

/// Update a user's name or email
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = TAG,
    params(("id" = i64, Path, description = "User ID")),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "Relayed from the server"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn update_user(
    State(client): State<ServerClient>,
    OriginalUri(uri): OriginalUri,
    _: IdPath,
    ValidatedJson(input): ValidatedJson<UpdateUser>,
) -> Result<Response, AppError> {
    client.send_json(Method::PATCH, &uri, None, &input).await
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "Relayed from the server"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn delete_user(
    State(client): State<ServerClient>,
    OriginalUri(uri): OriginalUri,
    _: IdPath,
) -> Result<Response, AppError> {
    client.send(Method::DELETE, &uri, None).await
}
