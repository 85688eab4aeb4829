//! 上游表格数据 API 客户端

use async_trait::async_trait;
use reqwest::Url;

use common::config::UpstreamConfig;
use common::errors::{AppError, AppResult};
use common::models::UpstreamPage;

/// 按顺序发送给上游列表接口的查询参数
pub type QueryParams = Vec<(String, String)>;

/// 上游记录查询接口
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// 从 `table_id` 获取一页记录
    async fn list_records(&self, table_id: &str, params: &QueryParams) -> AppResult<UpstreamPage>;
}

/// 基于 reqwest 的 Airtable REST API 客户端
pub struct AirtableClient {
    http_client: reqwest::Client,
    base_url: String,
    base_id: Option<String>,
    token: Option<String>,
}

impl AirtableClient {
    /// 根据上游配置创建客户端
    pub fn new(config: &UpstreamConfig) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            http_client,
            base_url: config.base_url.clone(),
            base_id: config.base_id.clone(),
            token: config.token.clone(),
        })
    }

    /// 构造 `{base_url}/v0/{base_id}/{table_id}`，各路径段均做百分号编码
    fn table_url(&self, table_id: &str) -> AppResult<Url> {
        let base_id = self
            .base_id
            .as_deref()
            .ok_or_else(|| AppError::Upstream("AIRTABLE_BASE_ID is not configured".into()))?;

        let mut url = Url::parse(&self.base_url)
            .map_err(|e| AppError::Upstream(format!("invalid upstream url: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| AppError::Upstream("upstream url cannot be a base".into()))?
            .pop_if_empty()
            .extend(["v0", base_id, table_id]);
        Ok(url)
    }
}

#[async_trait]
impl UpstreamClient for AirtableClient {
    async fn list_records(&self, table_id: &str, params: &QueryParams) -> AppResult<UpstreamPage> {
        let url = self.table_url(table_id)?;
        tracing::debug!(table = %table_id, params = params.len(), "querying upstream");

        let mut request = self.http_client.get(url).query(params);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Upstream(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(AppError::Upstream(format!("{} {}", status.as_u16(), body.trim())));
        }

        serde_json::from_str(&body)
            .map_err(|e| AppError::Upstream(format!("invalid upstream response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, Query, State},
        http::{HeaderMap, StatusCode},
        routing::get,
        Json, Router,
    };
    use serde_json::json;

    #[derive(Debug, Default)]
    struct Captured {
        base_id: String,
        table: String,
        query: Vec<(String, String)>,
        authorization: Option<String>,
    }

    type Capture = Arc<Mutex<Option<Captured>>>;

    async fn records_ok(
        State(capture): State<Capture>,
        Path((base_id, table)): Path<(String, String)>,
        Query(query): Query<Vec<(String, String)>>,
        headers: HeaderMap,
    ) -> Json<serde_json::Value> {
        *capture.lock().unwrap() = Some(Captured {
            base_id,
            table,
            query,
            authorization: headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .map(String::from),
        });
        Json(json!({
            "records": [
                { "id": "rec1", "createdTime": "2024-01-01T00:00:00.000Z", "fields": { "Cupon": "A1" } }
            ],
            "offset": "itrNext"
        }))
    }

    async fn records_denied() -> (StatusCode, Json<serde_json::Value>) {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": { "type": "INVALID_FILTER_BY_FORMULA" } })),
        )
    }

    async fn spawn_upstream(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client(base_url: String, base_id: Option<&str>) -> AirtableClient {
        AirtableClient::new(&UpstreamConfig {
            base_url,
            base_id: base_id.map(String::from),
            token: Some("pat-test".into()),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_list_records_sends_path_query_and_token() {
        let capture: Capture = Arc::default();
        let app = Router::new()
            .route("/v0/{base_id}/{table}", get(records_ok))
            .with_state(capture.clone());
        let base_url = spawn_upstream(app).await;

        let params: QueryParams = vec![
            ("maxRecords".into(), "10".into()),
            ("fields[]".into(), "ID Cita".into()),
            ("fields[]".into(), "Costo PIF + IVA".into()),
        ];
        let page = client(base_url, Some("appBase"))
            .list_records("Operativo Laboratorios", &params)
            .await
            .unwrap();

        assert_eq!(page.records.len(), 1);
        assert_eq!(page.records[0].id, "rec1");
        assert_eq!(page.records[0].fields["Cupon"], "A1");
        assert_eq!(page.offset.as_deref(), Some("itrNext"));

        let captured = capture.lock().unwrap().take().unwrap();
        assert_eq!(captured.base_id, "appBase");
        assert_eq!(captured.table, "Operativo Laboratorios");
        assert_eq!(captured.query, params);
        assert_eq!(captured.authorization.as_deref(), Some("Bearer pat-test"));
    }

    #[tokio::test]
    async fn test_list_records_without_token_omits_authorization() {
        let capture: Capture = Arc::default();
        let app = Router::new()
            .route("/v0/{base_id}/{table}", get(records_ok))
            .with_state(capture.clone());
        let base_url = spawn_upstream(app).await;

        let client = AirtableClient::new(&UpstreamConfig {
            base_url,
            base_id: Some("appBase".into()),
            token: None,
            timeout_secs: 5,
        })
        .unwrap();
        client
            .list_records("HEXALUD RED", &QueryParams::new())
            .await
            .unwrap();

        let captured = capture.lock().unwrap().take().unwrap();
        assert_eq!(captured.table, "HEXALUD RED");
        assert!(captured.authorization.is_none());
    }

    #[tokio::test]
    async fn test_non_success_status_carries_body() {
        let app = Router::new().route("/v0/{base_id}/{table}", get(records_denied));
        let base_url = spawn_upstream(app).await;

        let err = client(base_url, Some("appBase"))
            .list_records("HEXALUD RED", &QueryParams::new())
            .await
            .unwrap_err();

        match err {
            AppError::Upstream(detail) => {
                assert!(detail.starts_with("422"), "{detail}");
                assert!(detail.contains("INVALID_FILTER_BY_FORMULA"), "{detail}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_transport_failure_is_upstream_error() {
        // 绑定后立即释放，得到一个无人监听的端口
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(format!("http://{}", addr), Some("appBase"))
            .list_records("HEXALUD RED", &QueryParams::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Upstream(ref d) if d.starts_with("request failed")));
    }

    #[tokio::test]
    async fn test_missing_base_id_fails_without_request() {
        let err = client("http://127.0.0.1:1".into(), None)
            .list_records("HEXALUD RED", &QueryParams::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Upstream(ref d) if d.contains("AIRTABLE_BASE_ID")));
    }

    #[test]
    fn test_table_url_encodes_segments() {
        let client = client("http://localhost:8080/".into(), Some("appBase"));
        let url = client.table_url("Operativo Laboratorios").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/v0/appBase/Operativo%20Laboratorios"
        );
    }
}
