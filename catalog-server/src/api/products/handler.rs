//! Product API Handlers

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use shared::models::{PaginatedResponse, Product, ProductAction, ProductCreate, ProductUpdate};

use crate::core::ServerState;
use crate::utils::{ActionRequest, AppResult, ProductListParams};

/// GET /api/products - 分页 + 过滤的商品列表
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ProductListParams>,
) -> AppResult<Json<PaginatedResponse<Product>>> {
    let page = state
        .catalog
        .list_products(&params.to_query(), params.refresh())
        .await?;
    Ok(Json(page.as_ref().clone()))
}

/// HEAD /api/products - liveness probe, never touches the store
pub async fn probe() -> StatusCode {
    StatusCode::OK
}

/// GET /api/products/:id - 获取单个商品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let product = state.catalog.get_product(&id).await?;
    Ok(Json(product))
}

/// POST /api/products - 创建商品
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<ProductCreate>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let Json(payload) = payload?;
    let product = state.catalog.create_product(payload).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/products/:id - 更新商品 (部分字段)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<ProductUpdate>, JsonRejection>,
) -> AppResult<Json<Product>> {
    let Json(payload) = payload?;
    let product = state.catalog.update_product(&id, payload).await?;
    Ok(Json(product))
}

/// DELETE /api/products/:id - 删除商品
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.catalog.delete_product(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/products/:id/action - increment / decrement / view
pub async fn action(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<ActionRequest>, JsonRejection>,
) -> AppResult<Json<Product>> {
    let Json(payload) = payload?;

    // unknown id wins over unknown action
    state.catalog.get_product(&id).await?;
    let action: ProductAction = payload.action.unwrap_or_default().parse()?;

    let product = state.catalog.apply_action(&id, action).await?;
    Ok(Json(product))
}
