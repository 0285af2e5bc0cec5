mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use common::*;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_list_defaults() {
    let (app, _) = build_test_app();
    let (status, page) = get(&app, "/api/products").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 4);
    assert_eq!(page["page"], 1);
    assert_eq!(page["pageSize"], 50);
    assert_eq!(
        item_names(&page),
        ["Linen Shirt", "Jeans Jacket", "Black T-Shirt", "Slim Fit Jeans"]
    );
}

#[tokio::test]
async fn test_search_jean_returns_both_jeans() {
    let (app, _) = build_test_app();
    let (_, page) = get(&app, "/api/products?q=jean").await;
    assert_eq!(item_names(&page), ["Jeans Jacket", "Slim Fit Jeans"]);
    assert_eq!(page["total"], 2);
}

#[tokio::test]
async fn test_category_filter_and_all() {
    let (app, _) = build_test_app();
    let (_, page) = get(&app, "/api/products?categoryId=2").await;
    assert_eq!(page["total"], 2);

    let (_, page) = get(&app, "/api/products?categoryId=all").await;
    assert_eq!(page["total"], 4);

    let (_, page) = get(&app, "/api/products?q=jean&categoryId=3").await;
    assert_eq!(page["total"], 0);
}

#[tokio::test]
async fn test_pagination_sizes() {
    let (app, _) = build_test_app();
    for (page, page_size, expected) in [(1, 3, 3), (2, 3, 1), (3, 3, 0), (1, 10, 4), (4, 1, 1)] {
        let uri = format!("/api/products?page={page}&pageSize={page_size}");
        let (status, body) = get(&app, &uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["items"].as_array().unwrap().len(), expected, "{uri}");
        assert_eq!(body["total"], 4);
    }
}

#[tokio::test]
async fn test_garbage_paging_is_normalised() {
    let (app, _) = build_test_app();
    let (status, page) = get(&app, "/api/products?page=abc&pageSize=-7").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["page"], 1);
    assert_eq!(page["pageSize"], 1);

    let (_, page) = get(&app, "/api/products?pageSize=50000").await;
    assert_eq!(page["pageSize"], 1000);
}

#[tokio::test]
async fn test_head_probe() {
    let (app, _) = build_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::HEAD)
                .uri("/api/products")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_get_by_id_and_not_found() {
    let (app, _) = build_test_app();
    let (status, product) = get(&app, "/api/products/3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(product["name"], "Black T-Shirt");
    assert_eq!(product["price"], 20.0);
    assert_eq!(product["categoryId"], "3");

    let (status, body) = get(&app, "/api/products/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_create_returns_201_and_prepends() {
    let (app, _) = build_test_app();
    let (status, product) = post(
        &app,
        "/api/products",
        json!({ "name": "Wool Scarf", "price": 12.5, "quantity": 3, "categoryId": "1" }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(product["price"], 12.5);
    assert!(product["id"].as_str().is_some());
    assert!(product["createdAt"].is_string());
    assert_eq!(product["createdAt"], product["updatedAt"]);

    let (_, page) = get(&app, "/api/products?pageSize=1").await;
    assert_eq!(item_names(&page), ["Wool Scarf"]);
    assert_eq!(page["total"], 5);
}

#[tokio::test]
async fn test_create_short_name_fails_validation() {
    let (app, _) = build_test_app();
    let (status, body) = post(&app, "/api/products", json!({ "name": "A" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation");
    let fields: Vec<&str> = body["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, ["name", "price", "quantity"]);
}

#[tokio::test]
async fn test_create_negative_price_names_price() {
    let (app, _) = build_test_app();
    let (status, body) = post(
        &app,
        "/api/products",
        json!({ "name": "Shirt", "price": -1, "quantity": 2 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"][0]["field"], "price");
    assert!(body["message"].as_str().unwrap().contains("price"));

    // nothing was written
    let (_, page) = get(&app, "/api/products").await;
    assert_eq!(page["total"], 4);
}

#[tokio::test]
async fn test_malformed_json_is_validation_error() {
    let (app, _) = build_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/products")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{ \"name\": "))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["error"], "validation");
    assert_eq!(body["fields"][0]["field"], "body");
}

#[tokio::test]
async fn test_update_partial_and_null_category() {
    let (app, _) = build_test_app();
    let (status, product) = put(&app, "/api/products/1", json!({ "price": 50 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(product["price"], 50.0);
    assert_eq!(product["quantity"], 90);
    assert_eq!(product["categoryId"], "1");

    let (_, product) = put(&app, "/api/products/1", json!({ "categoryId": null })).await;
    assert!(product["categoryId"].is_null());
}

#[tokio::test]
async fn test_update_errors() {
    let (app, _) = build_test_app();
    let (status, _) = put(&app, "/api/products/missing", json!({ "price": 1 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = put(&app, "/api/products/1", json!({ "quantity": -2 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"][0]["field"], "quantity");
}

#[tokio::test]
async fn test_delete_then_delete_again() {
    let (app, _) = build_test_app();
    let (status, body) = delete(&app, "/api/products/2").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, body) = delete(&app, "/api/products/2").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_actions() {
    let (app, _) = build_test_app();
    let (status, product) = post(&app, "/api/products/3/action", json!({ "action": "increment" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(product["quantity"], 9);

    let (_, product) = post(&app, "/api/products/4/action", json!({ "action": "decrement" })).await;
    assert_eq!(product["quantity"], 0);

    let (_, product) = post(&app, "/api/products/1/action", json!({ "action": "view" })).await;
    assert_eq!(product["quantity"], 90);

    let (status, body) = post(&app, "/api/products/1/action", json!({ "action": "explode" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "unknown_action");

    let (status, _) = post(&app, "/api/products/missing/action", json!({ "action": "explode" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let (app, _) = build_test_app();
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let id = response.headers().get("x-request-id").unwrap().to_str().unwrap();
    assert_eq!(id.len(), 36);
}
