//! Read cache control

use axum::{Router, extract::State, http::StatusCode, routing::delete};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/cache", delete(clear))
}

/// DELETE /api/cache - 清空读缓存
pub async fn clear(State(state): State<ServerState>) -> StatusCode {
    state.catalog.invalidate_cache();
    tracing::info!("Read cache cleared on request");
    StatusCode::NO_CONTENT
}
