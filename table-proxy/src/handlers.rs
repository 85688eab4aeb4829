//! Handler模块

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use common::errors::{AppResult, ErrorBody};
use common::models::{QueryRequest, QueryResult};

use crate::service::QueryService;
use crate::state::AppState;

/// 查询允许的表
#[utoipa::path(
    post,
    path = "/query",
    tag = "query",
    request_body = QueryRequest,
    params(
        ("x-api-key" = String, Header, description = "内部 API 密钥")
    ),
    responses(
        (status = 200, description = "查询成功", body = QueryResult),
        (status = 400, description = "表不允许、请求无效或上游错误", body = ErrorBody),
        (status = 401, description = "API 密钥缺失或错误", body = ErrorBody)
    )
)]
pub async fn query(
    State(state): State<AppState>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> AppResult<Json<QueryResult>> {
    let Json(req) = payload?;
    let service = QueryService::new(state.upstream.clone());
    let result = service.execute(req).await?;
    Ok(Json(result))
}

/// 健康检查端点
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "服务运行正常", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub ok: bool,
}
