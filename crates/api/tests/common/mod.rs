//! Shared helpers for API integration tests.
//!
//! Tests drive the real router in-process through `tower::ServiceExt::oneshot`,
//! so the full middleware stack runs on every request.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use recallr_api::auth::jwt::JwtConfig;
use recallr_api::config::ServerConfig;
use recallr_api::router::build_app_router;
use recallr_api::state::AppState;

pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Build a test `ServerConfig` with a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:8080".to_string()],
        request_timeout_secs: 30,
        min_password_length: 8,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the production router on top of the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send one request, optionally authenticated and with a JSON body.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: &Router, uri: &str, token: &str, body: Value) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json(app: &Router, uri: &str, token: &str, body: Value) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn patch_json(app: &Router, uri: &str, token: &str, body: Value) -> Response {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn delete(app: &Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Unauthenticated POST.
pub async fn post_public(app: &Router, uri: &str, body: Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Register `username` through the API and return the created user id.
pub async fn signup(app: &Router, username: &str) -> i64 {
    let body = json!({
        "username": username,
        "email": format!("{username}@test.com"),
        "password": TEST_PASSWORD,
        "confirm_password": TEST_PASSWORD,
    });
    let response = post_public(app, "/api/v1/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["user_id"].as_i64().unwrap()
}

/// Log in and return the full auth response.
pub async fn login(app: &Router, username: &str) -> Value {
    let body = json!({ "username": username, "password": TEST_PASSWORD });
    let response = post_public(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

/// Register and log in a fresh user, returning its access token.
pub async fn access_token(app: &Router, username: &str) -> String {
    signup(app, username).await;
    login(app, username).await["access_token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Create a deck owned by the token's user and return its id.
pub async fn create_deck(app: &Router, token: &str, name: &str, folder: &str) -> i64 {
    let body = json!({ "name": name, "folder": folder, "color": "#5D9CFF" });
    let response = post_json(app, "/api/v1/decks", token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Add a single card to a deck and return its id.
pub async fn add_card(app: &Router, token: &str, deck_id: i64, term: &str, definition: &str) -> i64 {
    let uri = format!("/api/v1/decks/{deck_id}/flashcards");
    let body = json!({ "term": term, "definition": definition });
    let response = post_json(app, &uri, token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// A deck's cards as `(id, term, definition)` in storage order.
pub async fn deck_cards(app: &Router, token: &str, deck_id: i64) -> Vec<(i64, String, String)> {
    let uri = format!("/api/v1/decks/{deck_id}/flashcards");
    let response = get(app, &uri, token).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| {
            (
                c["id"].as_i64().unwrap(),
                c["term"].as_str().unwrap().to_string(),
                c["definition"].as_str().unwrap().to_string(),
            )
        })
        .collect()
}
