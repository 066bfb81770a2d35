//! Acting-user header extractor.

use crate::errors::{ErrorCode, ErrorResponse};
use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};

/// Header that identifies the user performing a request.
pub const SHARER_USER_ID_HEADER: &str = "X-Sharer-User-Id";

/// The id carried in `X-Sharer-User-Id`.
///
/// Missing, non-UTF-8 or non-integer values are rejected with 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharerUserId(pub i64);

impl<S> FromRequestParts<S> for SharerUserId
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(SHARER_USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<i64>().ok())
            .map(SharerUserId)
            .ok_or_else(|| {
                let code = ErrorCode::InvalidUserHeader;
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::new(code, code.default_message())),
                )
                    .into_response()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, routing::get};
    use tower::ServiceExt;

    async fn whoami(SharerUserId(id): SharerUserId) -> String {
        id.to_string()
    }

    async fn status_for(header: Option<&str>) -> StatusCode {
        let mut request = Request::get("/me");
        if let Some(value) = header {
            request = request.header(SHARER_USER_ID_HEADER, value);
        }
        Router::new()
            .route("/me", get(whoami))
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_header_present() {
        assert_eq!(status_for(Some("5")).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_header_missing() {
        assert_eq!(status_for(None).await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_header_not_a_number() {
        assert_eq!(status_for(Some("five")).await, StatusCode::BAD_REQUEST);
    }
}
