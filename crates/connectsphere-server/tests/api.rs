//! End-to-end tests driving the assembled router in-process.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use connectsphere_api::auth::{AppState, AppStateInner};
use connectsphere_db::Database;
use connectsphere_server::app;

fn test_app() -> Router {
    let db = Database::open(Path::new(":memory:")).unwrap();
    // Matches the middleware's fallback when the env var is unset.
    let jwt_secret = std::env::var("CONNECTSPHERE_JWT_SECRET")
        .unwrap_or_else(|_| "dev-secret-change-me".into());
    let state: AppState = Arc::new(AppStateInner { db, jwt_secret });
    app(state)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn register(app: &Router, username: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/auth/register",
        None,
        Some(json!({ "username": username, "password": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
    body["token"].as_str().unwrap().to_string()
}

async fn create_sell_post(app: &Router, token: &str, description: &str, price_cents: i64) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/posts",
        Some(token),
        Some(json!({
            "image": "https://img.example/art.jpg",
            "description": description,
            "status": "sell",
            "art_type": "Paintings",
            "price_cents": price_cents,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create post failed: {}", body);
    body["post_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn unauthenticated_requests_are_rejected() {
    let app = test_app();

    let (status, _) = send(&app, "GET", "/posts", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/posts", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_returns_a_usable_token() {
    let app = test_app();
    register(&app, "alice").await;

    let (status, body) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "username": "alice", "password": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap();

    let (status, feed) = send(&app, "GET", "/posts", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(feed, json!([]));

    let (status, _) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "username": "alice", "password": "wrong-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn duplicate_username_is_a_conflict() {
    let app = test_app();
    register(&app, "alice").await;

    let (status, _) = send(
        &app,
        "POST",
        "/auth/register",
        None,
        Some(json!({ "username": "alice", "password": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn full_purchase_flow() {
    let app = test_app();
    let alice = register(&app, "alice").await;
    let bob = register(&app, "bob").await;
    let carol = register(&app, "carol").await;

    let post_id = create_sell_post(&app, &alice, "Sunset oil", 5000).await;

    // Bob sees the listing in his feed, unsold and unliked.
    let (status, feed) = send(&app, "GET", "/posts", Some(&bob), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(feed[0]["id"], json!(post_id));
    assert_eq!(feed[0]["sold"], json!(false));
    assert_eq!(feed[0]["liked_by_me"], json!(false));

    // Bob likes it; the feed reflects it and Alice is notified.
    let uri = format!("/posts/{}/like", post_id);
    let (status, body) = send(&app, "POST", &uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "liked": true }));

    let (_, feed) = send(&app, "GET", "/posts", Some(&bob), None).await;
    assert_eq!(feed[0]["like_count"], json!(1));
    assert_eq!(feed[0]["liked_by_me"], json!(true));

    // Bob checks out with a shipping address.
    let uri = format!("/posts/{}/checkout", post_id);
    let (status, _) = send(
        &app,
        "POST",
        &uri,
        Some(&bob),
        Some(json!({
            "street": "1 Main St",
            "city": "Springfield",
            "state": "IL",
            "zip_code": "62701",
            "country": "USA",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, feed) = send(&app, "GET", "/posts", Some(&bob), None).await;
    assert_eq!(feed[0]["sold"], json!(true));

    // Alice's notifications: the purchase (with price) and the like.
    let (status, notifications) = send(&app, "GET", "/notifications", Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    let kinds: Vec<&str> = notifications
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["kind"].as_str().unwrap())
        .collect();
    assert!(kinds.contains(&"purchase"));
    assert!(kinds.contains(&"like"));
    let purchase = notifications
        .as_array()
        .unwrap()
        .iter()
        .find(|n| n["kind"] == json!("purchase"))
        .unwrap();
    assert!(purchase["message"].as_str().unwrap().contains("50.00"));
    assert!(purchase["message"].as_str().unwrap().contains("1 Main St"));
    assert_eq!(purchase["actor_username"], json!("bob"));

    // Carol is too late.
    let (status, body) = send(
        &app,
        "POST",
        &uri,
        Some(&carol),
        Some(json!({
            "street": "2 Oak Ave",
            "city": "Springfield",
            "state": "IL",
            "zip_code": "62701",
            "country": "USA",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT, "body: {}", body);
}

#[tokio::test]
async fn whitespace_comment_is_rejected() {
    let app = test_app();
    let alice = register(&app, "alice").await;
    let bob = register(&app, "bob").await;
    let post_id = create_sell_post(&app, &alice, "Sunset oil", 5000).await;

    let uri = format!("/posts/{}/comments", post_id);
    let (status, _) = send(
        &app,
        "POST",
        &uri,
        Some(&bob),
        Some(json!({ "body": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, comments) = send(&app, "GET", &uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(comments, json!([]));
}

#[tokio::test]
async fn comments_and_likers_for_unknown_posts_are_not_found() {
    let app = test_app();
    let alice = register(&app, "alice").await;

    let missing = uuid_like();
    let (status, _) = send(
        &app,
        "GET",
        &format!("/posts/{}/comments", missing),
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "GET",
        &format!("/posts/{}/likes", missing),
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn profile_shows_the_users_posts() {
    let app = test_app();
    let alice = register(&app, "alice").await;
    let bob = register(&app, "bob").await;
    let post_id = create_sell_post(&app, &alice, "Sunset oil", 5000).await;

    let (status, profile) = send(&app, "GET", "/users/alice", Some(&bob), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["username"], json!("alice"));
    assert_eq!(profile["posts"][0]["id"], json!(post_id));

    let (status, _) = send(&app, "GET", "/users/nobody", Some(&bob), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn notifications_can_be_marked_read_by_their_owner_only() {
    let app = test_app();
    let alice = register(&app, "alice").await;
    let bob = register(&app, "bob").await;
    let post_id = create_sell_post(&app, &alice, "Sunset oil", 5000).await;

    let uri = format!("/posts/{}/like", post_id);
    send(&app, "POST", &uri, Some(&bob), None).await;

    let (_, notifications) = send(&app, "GET", "/notifications", Some(&alice), None).await;
    let id = notifications[0]["id"].as_str().unwrap().to_string();
    assert_eq!(notifications[0]["is_read"], json!(false));

    // Bob (the actor) cannot mark Alice's notification.
    let uri = format!("/notifications/{}/read", id);
    let (status, _) = send(&app, "POST", &uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "POST", &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, notifications) = send(&app, "GET", "/notifications", Some(&alice), None).await;
    assert_eq!(notifications[0]["is_read"], json!(true));
}

fn uuid_like() -> &'static str {
    "00000000-0000-0000-0000-00000000dead"
}
