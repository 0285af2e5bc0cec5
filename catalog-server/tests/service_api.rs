mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use catalog_server::Config;
use catalog_server::db::{
    CatalogDocument, CatalogStore, MemoryStore, StoreError, StoreResult, seed,
};
use common::*;
use serde_json::json;
use tower::ServiceExt;

/// Primary store that counts loads and can be taken down
#[derive(Default)]
struct TestStore {
    inner: MemoryStore,
    loads: AtomicUsize,
    down: AtomicBool,
}

impl TestStore {
    fn empty() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl CatalogStore for TestStore {
    fn backend(&self) -> &'static str {
        "test"
    }

    async fn load(&self) -> StoreResult<CatalogDocument> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if self.down.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("connection refused".into()));
        }
        self.inner.load().await
    }

    async fn save(&self, document: &CatalogDocument) -> StoreResult<()> {
        if self.down.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("connection refused".into()));
        }
        self.inner.save(document).await
    }
}

// ========== stats ==========

#[tokio::test]
async fn test_stats_ignore_current_page() {
    let (app, _) = build_test_app();
    // a narrow page is displayed
    get(&app, "/api/products?page=2&pageSize=1&q=shirt").await;

    let (status, stats) = get(&app, "/api/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["totalCount"], 4);
    assert_eq!(stats["totalValue"], 8760.0);
    assert_eq!(stats["lowStockThreshold"], 10);

    let mut low: Vec<u64> = stats["lowStock"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["quantity"].as_u64().unwrap())
        .collect();
    low.sort();
    assert_eq!(low, [0, 8]);

    assert_eq!(stats["byCategory"][1]["name"], "Pants");
    assert_eq!(stats["byCategory"][1]["count"], 2);
}

#[tokio::test]
async fn test_stats_follow_writes() {
    let (app, _) = build_test_app();
    get(&app, "/api/stats").await;
    post(&app, "/api/products/4/action", json!({ "action": "increment" })).await;

    let (_, stats) = get(&app, "/api/stats").await;
    // 8760 + 80
    assert_eq!(stats["totalValue"], 8840.0);
    assert_eq!(stats["lowStock"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_price_above_limit_keeps_stats_working() {
    let (app, _) = build_test_app();
    let (status, body) = post(
        &app,
        "/api/products",
        json!({ "name": "Gold Bar", "price": 1e28, "quantity": 10 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"][0]["field"], "price");

    let (status, stats) = get(&app, "/api/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["totalValue"], 8760.0);
}

// ========== cache ==========

#[tokio::test]
async fn test_repeated_read_hits_store_once() {
    let store = TestStore::empty();
    let (app, _) = build_test_app_with_store(store.clone(), true);

    get(&app, "/api/products?q=x&page=1").await;
    get(&app, "/api/products?q=x&page=1").await;
    assert_eq!(store.loads.load(Ordering::SeqCst), 1);

    get(&app, "/api/products?q=x&page=1&refresh=true").await;
    assert_eq!(store.loads.load(Ordering::SeqCst), 2);

    // write clears the cache
    post(&app, "/api/categories", json!({ "name": "Hats" })).await;
    let loads = store.loads.load(Ordering::SeqCst);
    get(&app, "/api/products?q=x&page=1").await;
    assert_eq!(store.loads.load(Ordering::SeqCst), loads + 1);
}

#[tokio::test]
async fn test_clear_cache_endpoint() {
    let store = TestStore::empty();
    let (app, state) = build_test_app_with_store(store.clone(), true);

    get(&app, "/api/categories").await;
    assert_eq!(state.catalog.cache_len(), 1);

    let (status, _) = delete(&app, "/api/cache").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(state.catalog.cache_len(), 0);

    get(&app, "/api/categories").await;
    assert_eq!(store.loads.load(Ordering::SeqCst), 2);
}

// ========== offline fallback ==========

#[tokio::test]
async fn test_unreachable_store_serves_mock_data() {
    let store = TestStore::empty();
    store.down.store(true, Ordering::SeqCst);
    let (app, state) = build_test_app_with_store(store.clone(), true);

    let (status, page) = get(&app, "/api/products?q=jean").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item_names(&page), ["Jeans Jacket", "Slim Fit Jeans"]);
    assert!(state.is_offline());

    // writes land in the mirror
    let (status, _) = delete(&app, "/api/products/1").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    store.down.store(false, Ordering::SeqCst);
    let (_, page) = get(&app, "/api/products?refresh=true").await;
    assert_eq!(page["total"], 3);

    let (_, health) = get(&app, "/health/detailed").await;
    assert_eq!(health["offline"], true);
    assert_eq!(health["status"], "degraded");
}

#[tokio::test]
async fn test_disabled_fallback_returns_internal_error() {
    let store = TestStore::empty();
    store.down.store(true, Ordering::SeqCst);
    let (app, state) = build_test_app_with_store(store, false);

    let (status, body) = get(&app, "/api/products").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "internal_error");
    assert!(!state.is_offline());

    let (_, health) = get(&app, "/health/detailed").await;
    assert_eq!(health["offlineFallback"], false);
}

// ========== rate limiting ==========

async fn get_from(app: &axum::Router, uri: &str, client: &str) -> StatusCode {
    app.clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .header("x-forwarded-for", client)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
        .status()
}

#[tokio::test]
async fn test_rate_limit_per_client() {
    let config = Config {
        rate_limit_max: 3,
        ..Config::in_memory()
    };
    let primary = Arc::new(MemoryStore::with_document(seed::mock_document()));
    let (app, _) = build_test_app_with_config(primary, config);

    for _ in 0..3 {
        assert_eq!(get_from(&app, "/api/products", "203.0.113.7").await, StatusCode::OK);
    }
    assert_eq!(
        get_from(&app, "/api/products", "203.0.113.7").await,
        StatusCode::TOO_MANY_REQUESTS
    );
    assert_eq!(get_from(&app, "/api/products", "203.0.113.8").await, StatusCode::OK);
}

#[tokio::test]
async fn test_rate_limited_body() {
    let config = Config {
        rate_limit_max: 1,
        ..Config::in_memory()
    };
    let (app, _) = build_test_app_with_config(Arc::new(MemoryStore::default()), config);
    get(&app, "/health").await;

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"], "rate_limited");
}

#[tokio::test]
async fn test_security_headers() {
    let (app, _) = build_test_app();
    let response = app
        .oneshot(Request::builder().uri("/api/products").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let headers = response.headers();
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "SAMEORIGIN");
    assert_eq!(headers["referrer-policy"], "no-referrer");
}

// ========== health & routing ==========

#[tokio::test]
async fn test_health() {
    let (app, _) = build_test_app();
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["time"].is_string());

    let (status, body) = get(&app, "/health/detailed").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storeBackend"], "memory");
    assert_eq!(body["offline"], false);
    assert_eq!(body["offlineFallback"], true);
    assert_eq!(body["checks"]["store"]["status"], "ok");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (app, _) = build_test_app();
    let (status, body) = get(&app, "/api/unknown").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}
