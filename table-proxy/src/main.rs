//! 表格数据代理服务
//!
//! 位于第三方表格数据 API 之前的访问控制代理：
//! - 校验 x-api-key
//! - 按表白名单/黑名单过滤字段
//! - 构造受限的上游查询并整理响应

mod handlers;
mod routes;
mod service;
mod state;
#[cfg(test)]
mod test_support;
mod upstream;

use axum::{middleware, routing::get, Json, Router};
use common::config::AppConfig;
use common::middleware::request_id::request_id_middleware;
use state::AppState;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;

const SERVICE_NAME: &str = "table-proxy";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "表格代理 API",
        version = "0.1.0",
        description = "表格数据访问控制与字段过滤代理"
    ),
    paths(
        handlers::query,
        handlers::health_check,
    ),
    components(schemas(
        common::models::QueryRequest,
        common::models::QueryResult,
        common::models::RecordItem,
        common::models::SortSpec,
        common::errors::ErrorBody,
        handlers::HealthResponse,
    )),
    tags(
        (name = "query", description = "查询端点"),
        (name = "health", description = "健康检查端点")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志追踪
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // 加载配置
    let config = AppConfig::load();
    let missing = config.missing_vars();
    if !missing.is_empty() {
        warn!(missing = ?missing, "缺少环境变量");
    }

    // 创建应用状态
    let state = AppState::new(&config)?;

    // 创建路由
    let app = create_router(state);

    // 启动服务
    let addr = config.bind_addr();
    info!(service = SERVICE_NAME, address = %addr, "启动服务");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::router(state.auth.clone()))
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
