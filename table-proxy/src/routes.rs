//! 路由模块

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use common::middleware::{api_key_middleware, ApiKeyAuth};

use crate::handlers;
use crate::state::AppState;

/// 创建代理路由：`/query` 需要 `x-api-key`，`/health` 公开
pub fn router(auth: ApiKeyAuth) -> Router<AppState> {
    Router::new()
        .route("/query", post(handlers::query))
        .route_layer(middleware::from_fn_with_state(auth, api_key_middleware))
        .route("/health", get(handlers::health_check))
}
