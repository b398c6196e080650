//! Shared setup for the HTTP integration tests.
#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;
use weather_backend_lib::{config::Settings, create_router, AppState};

pub const TEST_KEY: &str = "integration-test-signing-key-32by";

/// Settings with a valid key and short-lived access tokens
pub fn test_settings() -> Settings {
    let mut settings = Settings::default();
    settings.jwt.key = TEST_KEY.to_string();
    settings.jwt.issuer = "weather-tests".to_string();
    settings.jwt.audience = "weather-tests".to_string();
    settings.jwt.expiration_seconds = 60;
    settings
}

/// Build the state and router the way the binary does
pub fn setup() -> (AppState, Router) {
    let state = AppState::new(test_settings()).expect("valid test settings");
    let router = create_router(state.clone());
    (state, router)
}

/// Send a request and return the status plus the body parsed as JSON (`Null` when empty)
pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()))
    };
    (status, json)
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_with_auth(uri: &str, authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::empty()).unwrap()
}

/// Log in with the default credential pair, returning (access, refresh)
pub async fn login(router: &Router) -> (String, String) {
    let (status, body) = send(
        router,
        post_json("/login", serde_json::json!({"username": "username", "password": "password"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    (
        body["accessToken"].as_str().unwrap().to_string(),
        body["refreshToken"].as_str().unwrap().to_string(),
    )
}
