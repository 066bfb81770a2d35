//! Readiness probe: the gateway is only useful while the server answers.

use crate::client::ServerClient;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};

pub async fn ready_handler(State(client): State<ServerClient>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> =
        vec![("server", Box::pin(async { client.health().await }))];

    match run_health_checks(checks).await {
        Ok((status, json)) => (status, json).into_response(),
        Err((status, json)) => (status, json).into_response(),
    }
}
