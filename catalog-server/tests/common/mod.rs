//! Shared helpers for the HTTP integration tests

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use catalog_server::db::{CatalogStore, FallbackStore, MemoryStore, seed};
use catalog_server::{Config, ServerState, build_app};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

/// App over the seeded in-memory catalog
pub fn build_test_app() -> (Router, ServerState) {
    build_test_app_with_store(Arc::new(MemoryStore::with_document(seed::mock_document())), true)
}

/// App over an arbitrary primary store
pub fn build_test_app_with_store(
    primary: Arc<dyn CatalogStore>,
    offline_fallback: bool,
) -> (Router, ServerState) {
    let config = Config {
        offline_fallback,
        ..Config::in_memory()
    };
    build_test_app_with_config(primary, config)
}

/// App over an arbitrary primary store and configuration
pub fn build_test_app_with_config(
    primary: Arc<dyn CatalogStore>,
    config: Config,
) -> (Router, ServerState) {
    let store = Arc::new(FallbackStore::new(primary, config.offline_fallback));
    let state = ServerState::new(config, store);
    (build_app(state.clone()), state)
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, body_json(response.into_body()).await)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::DELETE, uri, None).await
}

/// Body as JSON, `Value::Null` when empty
pub async fn body_json(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    }
}

/// Product names of a paginated response, in order
pub fn item_names(page: &Value) -> Vec<String> {
    page["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect()
}
