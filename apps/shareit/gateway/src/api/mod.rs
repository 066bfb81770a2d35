use axum::Router;

use crate::client::ServerClient;

pub mod bookings;
pub mod health;
pub mod items;
pub mod requests;
pub mod users;

/// The server's endpoint set, validated locally and forwarded through `client`.
pub fn routes(client: ServerClient) -> Router {
    Router::new()
        .nest("/users", users::router(client.clone()))
        .nest("/items", items::router(client.clone()))
        .nest("/bookings", bookings::router(client.clone()))
        .nest("/requests", requests::router(client))
}

/// `GET /ready`, probing the server's `/health`.
pub fn ready_router(client: ServerClient) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UpstreamConfig;
    use axum::{
        Json,
        body::{Body, Bytes},
        extract::State,
        http::{HeaderMap, Method, Request, StatusCode, Uri},
        response::IntoResponse,
        routing::get,
    };
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    /// Stand-in server that echoes what it received
    async fn echo(
        State(hits): State<Arc<AtomicUsize>>,
        method: Method,
        uri: Uri,
        headers: HeaderMap,
        body: Bytes,
    ) -> impl IntoResponse {
        hits.fetch_add(1, Ordering::SeqCst);
        let status = if method == Method::POST {
            StatusCode::CREATED
        } else {
            StatusCode::OK
        };
        let user = headers
            .get("X-Sharer-User-Id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

        (
            status,
            Json(json!({
                "method": method.as_str(),
                "uri": uri.to_string(),
                "user": user,
                "body": body,
            })),
        )
    }

    async fn missing_item() -> impl IntoResponse {
        (
            StatusCode::NOT_FOUND,
            Json(json!({"code": 4004, "error": "NOT_FOUND", "message": "Item 404 not found"})),
        )
    }

    async fn upstream() -> (ServerClient, Arc<AtomicUsize>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = Router::new()
            .route("/health", get(|| async { Json(json!({"status": "healthy"})) }))
            .route("/items/404", get(missing_item))
            .fallback(echo)
            .with_state(hits.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        (client_for(format!("http://{}", addr)), hits)
    }

    async fn unreachable() -> ServerClient {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        client_for(format!("http://{}", addr))
    }

    fn client_for(base_url: String) -> ServerClient {
        ServerClient::new(&UpstreamConfig {
            base_url,
            timeout_secs: 5,
        })
        .unwrap()
    }

    async fn call(client: &ServerClient, request: Request<Body>) -> (StatusCode, Value) {
        let app = routes(client.clone()).merge(ready_router(client.clone()));
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn json_request(method: &str, uri: &str, user: Option<i64>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(id) = user {
            builder = builder.header("X-Sharer-User-Id", id.to_string());
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get_request(uri: &str, user: Option<i64>) -> Request<Body> {
        let mut builder = Request::get(uri);
        if let Some(id) = user {
            builder = builder.header("X-Sharer-User-Id", id.to_string());
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_valid_user_is_forwarded() {
        let (client, hits) = upstream().await;

        let (status, body) = call(
            &client,
            json_request(
                "POST",
                "/users",
                None,
                json!({"name": "Ann", "email": "ann@example.com", "extra": true}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(body["method"], "POST");
        assert_eq!(body["uri"], "/users");
        assert_eq!(body["body"], json!({"name": "Ann", "email": "ann@example.com"}));
    }

    #[tokio::test]
    async fn test_invalid_user_never_reaches_server() {
        let (client, hits) = upstream().await;

        let (status, body) = call(
            &client,
            json_request("POST", "/users", None, json!({"name": "Ann", "email": "nope"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_header_and_query_are_forwarded() {
        let (client, _) = upstream().await;

        let (status, body) = call(
            &client,
            get_request("/bookings/owner?state=waiting&from=0&size=5", Some(7)),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["uri"], "/bookings/owner?state=waiting&from=0&size=5");
        assert_eq!(body["user"], "7");
    }

    #[tokio::test]
    async fn test_missing_user_header_is_rejected() {
        let (client, hits) = upstream().await;

        let (status, _) = call(&client, get_request("/items", None)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unknown_state_is_rejected() {
        let (client, hits) = upstream().await;

        let (status, body) = call(&client, get_request("/bookings?state=SOMEDAY", Some(1))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Unknown state: SOMEDAY");
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_bad_paging_is_rejected() {
        let (client, hits) = upstream().await;

        let (status, _) = call(&client, get_request("/requests/all?from=-1", Some(1))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = call(&client, get_request("/bookings?size=0", Some(1))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_booking_dates_are_checked() {
        let (client, hits) = upstream().await;

        let past = json!({"itemId": 1, "start": "2000-01-01T10:00:00", "end": "2099-01-01T10:00:00"});
        let (status, _) = call(&client, json_request("POST", "/bookings", Some(2), past)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let reversed =
            json!({"itemId": 1, "start": "2099-01-02T10:00:00", "end": "2099-01-01T10:00:00"});
        let (status, _) = call(&client, json_request("POST", "/bookings", Some(2), reversed)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        let valid = json!({"itemId": 1, "start": "2099-01-01T10:00:00", "end": "2099-01-02T10:00:00"});
        let (status, body) = call(&client, json_request("POST", "/bookings", Some(2), valid)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["body"]["itemId"], 1);
        assert_eq!(body["body"]["start"], "2099-01-01T10:00:00");
    }

    #[tokio::test]
    async fn test_invalid_path_id_is_rejected() {
        let (client, hits) = upstream().await;

        let (status, _) = call(&client, get_request("/items/abc", Some(1))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_upstream_errors_are_relayed() {
        let (client, _) = upstream().await;

        let (status, body) = call(&client, get_request("/items/404", Some(1))).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Item 404 not found");
    }

    #[tokio::test]
    async fn test_search_needs_no_header() {
        let (client, _) = upstream().await;

        let (status, body) = call(&client, get_request("/items/search?text=drill", None)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["uri"], "/items/search?text=drill");
        assert_eq!(body["user"], Value::Null);
    }

    #[tokio::test]
    async fn test_unreachable_server_is_503() {
        let client = unreachable().await;

        let (status, body) = call(&client, get_request("/users", None)).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "SERVICE_UNAVAILABLE");
    }

    #[test]
    fn test_openapi_documents_query_parameters() {
        use utoipa::OpenApi;

        let doc = serde_json::to_value(crate::openapi::ApiDoc::openapi()).unwrap();
        let query_params = |path: &str, method: &str| -> Vec<String> {
            doc["paths"][path][method]["parameters"]
                .as_array()
                .unwrap()
                .iter()
                .filter(|p| p["in"] == "query")
                .map(|p| p["name"].as_str().unwrap().to_string())
                .collect()
        };

        assert_eq!(query_params("/bookings/{id}", "patch"), ["approved"]);
        assert_eq!(query_params("/items/search", "get"), ["text"]);
        assert_eq!(query_params("/requests/all", "get"), ["from", "size"]);
    }

    #[tokio::test]
    async fn test_ready_follows_server_health() {
        let (client, _) = upstream().await;
        let (status, body) = call(&client, get_request("/ready", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["server"], "connected");

        let client = unreachable().await;
        let (status, body) = call(&client, get_request("/ready", None)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["server"], "disconnected");
    }
}
