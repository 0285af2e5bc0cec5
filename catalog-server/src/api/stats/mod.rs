//! Statistics API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/stats | GET | 全量库存统计 (总数, 总价值, 低库存, 分类分布) |

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use shared::models::CatalogStats;

use crate::core::ServerState;
use crate::utils::{AppResult, RefreshParams};

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/stats", get(get_stats))
}

/// GET /api/stats - statistics over every product, never a single page
pub async fn get_stats(
    State(state): State<ServerState>,
    Query(params): Query<RefreshParams>,
) -> AppResult<Json<CatalogStats>> {
    let stats = state.catalog.stats(params.refresh()).await?;
    Ok(Json(stats))
}
