use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use assetwatch_api::config::ServerConfig;
use assetwatch_api::router::{build_app, App};
use assetwatch_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        reminder_window_minutes: 15,
    }
}

/// Build the full application, using the given database pool.
///
/// Goes through the same [`build_app`] as `main.rs`, so tests exercise the
/// production middleware stack and trailing-slash normalization.
pub fn build_test_app(pool: PgPool) -> App {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app(state, &config)
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: App, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: App, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: App, uri: &str) -> Response {
    send(app, Method::POST, uri, None).await
}

pub async fn post_json(app: App, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: App, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn patch_json(app: App, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::PATCH, uri, Some(body)).await
}

pub async fn delete(app: App, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None).await
}

/// Create an asset through the API and return its JSON representation.
pub async fn create_asset(
    pool: &PgPool,
    name: &str,
    service_time: chrono::DateTime<chrono::Utc>,
    expiration_time: chrono::DateTime<chrono::Utc>,
) -> serde_json::Value {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/assets",
        serde_json::json!({
            "name": name,
            "description": format!("{name} description"),
            "service_time": service_time.to_rfc3339(),
            "expiration_time": expiration_time.to_rfc3339(),
        }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await
}
