//! Handler tests for the users domain
//!
//! Drive the users router with in-memory storage and check status codes and
//! JSON bodies.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_users::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app() -> Router {
    handlers::router(UserService::new(InMemoryUserRepository::new()))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn create(app: &Router, name: &str, email: &str) -> User {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/",
            json!({"name": name, "email": email}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

#[tokio::test]
async fn test_create_user_returns_201() {
    let app = app();
    let user = create(&app, "Ann", "ann@example.com").await;

    assert_eq!(user.id, 1);
    assert_eq!(user.name, "Ann");
    assert_eq!(user.email, "ann@example.com");
}

#[tokio::test]
async fn test_create_user_invalid_email_is_400() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/",
            json!({"name": "Ann", "email": "ann-at-example"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"]["email"].is_array());
}

#[tokio::test]
async fn test_create_user_missing_email_is_400() {
    let response = app()
        .oneshot(json_request("POST", "/", json!({"name": "Ann"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_user_duplicate_email_is_409() {
    let app = app();
    create(&app, "Ann", "ann@example.com").await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/",
            json!({"name": "Other Ann", "email": "ann@example.com"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_get_user_not_found() {
    let response = app()
        .oneshot(Request::get("/99").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "User 99 not found");
}

#[tokio::test]
async fn test_get_user_non_numeric_id_is_400() {
    let response = app()
        .oneshot(Request::get("/ann").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_patch_user_updates_only_given_fields() {
    let app = app();
    let ann = create(&app, "Ann", "ann@example.com").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/{}", ann.id),
            json!({"name": "Anna"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let updated: User = json_body(response.into_body()).await;
    assert_eq!(updated.name, "Anna");
    assert_eq!(updated.email, "ann@example.com");
}

#[tokio::test]
async fn test_patch_user_email_taken_by_other_is_409() {
    let app = app();
    create(&app, "Ann", "ann@example.com").await;
    let bob = create(&app, "Bob", "bob@example.com").await;

    let response = app
        .oneshot(json_request(
            "PATCH",
            &format!("/{}", bob.id),
            json!({"email": "ann@example.com"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_list_and_delete_users() {
    let app = app();
    let ann = create(&app, "Ann", "ann@example.com").await;
    let bob = create(&app, "Bob", "bob@example.com").await;

    let response = app
        .clone()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let users: Vec<User> = json_body(response.into_body()).await;
    assert_eq!(users, vec![ann.clone(), bob]);

    let response = app
        .clone()
        .oneshot(
            Request::delete(format!("/{}", ann.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::delete(format!("/{}", ann.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
