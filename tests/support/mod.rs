//! Shared helpers for HTTP-level integration tests.
//!
//! Requests are dispatched straight through the router with
//! `tower::ServiceExt::oneshot`; no network socket is bound.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use posts_api::db::repositories::LocalRepository;
use posts_api::db::repository::PostRepository;
use posts_api::http::{create_router, AppState};

/// Build an app backed by a fresh, empty in-memory repository.
pub fn test_app() -> Router {
    let repo = Arc::new(LocalRepository::new()) as Arc<dyn PostRepository>;
    create_router(AppState::new(repo))
}

/// Dispatch a synthetic request and return status plus raw body text.
pub async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, String) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// Dispatch a synthetic request and parse the response body as JSON.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let (status, text) = send_raw(app, method, uri, body).await;
    let json = serde_json::from_str(&text)
        .unwrap_or_else(|e| panic!("non-JSON body {:?} for {}: {}", text, uri, e));
    (status, json)
}

/// Create a post and return its response body.
pub async fn create_post(app: &Router, title: &str, body: &str, author: &str) -> Value {
    let (status, json) = send(
        app,
        Method::POST,
        "/post",
        Some(serde_json::json!({"title": title, "body": body, "author": author})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    json
}
