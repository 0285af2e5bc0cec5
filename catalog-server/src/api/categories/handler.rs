//! Category API Handlers

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use shared::models::{Category, CategoryCreate, CategoryUpdate};

use crate::core::ServerState;
use crate::utils::{AppResult, RefreshParams};

/// GET /api/categories - 获取所有分类
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<RefreshParams>,
) -> AppResult<Json<Vec<Category>>> {
    let categories = state.catalog.list_categories(params.refresh()).await?;
    Ok(Json(categories.as_ref().clone()))
}

/// GET /api/categories/:id - 获取单个分类
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Category>> {
    let category = state.catalog.get_category(&id).await?;
    Ok(Json(category))
}

/// POST /api/categories - 创建分类
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<CategoryCreate>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Category>)> {
    let Json(payload) = payload?;
    let category = state.catalog.create_category(payload).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /api/categories/:id - 重命名分类
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<CategoryUpdate>, JsonRejection>,
) -> AppResult<Json<Category>> {
    let Json(payload) = payload?;
    let category = state.catalog.update_category(&id, payload).await?;
    Ok(Json(category))
}

/// DELETE /api/categories/:id - 删除分类 (商品的 categoryId 置空)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.catalog.delete_category(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
