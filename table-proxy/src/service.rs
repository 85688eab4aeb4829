//! 查询代理服务模块
//!
//! 将调用方查询转换为受限的上游查询，并整理上游返回的数据页。

use std::collections::HashSet;
use std::sync::Arc;

use common::errors::AppResult;
use common::models::{QueryRequest, QueryResult, RecordItem, TableConfig};
use common::tables::table_config;
use common::utils::{FieldFilter, RecordLimit};

use crate::upstream::{QueryParams, UpstreamClient};

/// 超出该数量的排序条目将被忽略
pub const MAX_SORT_ENTRIES: usize = 3;

/// 字段过滤查询服务
pub struct QueryService {
    upstream: Arc<dyn UpstreamClient>,
}

impl QueryService {
    /// 创建新的查询服务实例
    pub fn new(upstream: Arc<dyn UpstreamClient>) -> Self {
        Self { upstream }
    }

    /// 在允许的表上执行查询
    ///
    /// 表未配置时直接失败，不会发起上游请求。
    pub async fn execute(&self, req: QueryRequest) -> AppResult<QueryResult> {
        let cfg = table_config(&req.table)?;
        let fields = FieldFilter::effective_fields(cfg, &req.fields);
        let params = build_params(cfg, &req, &fields);

        let page = self.upstream.list_records(cfg.id_or_name, &params).await?;
        tracing::info!(
            table = %cfg.name,
            records = page.records.len(),
            has_more = page.offset.is_some(),
            "query completed"
        );

        let exposed: HashSet<&str> = fields.iter().map(String::as_str).collect();
        let records = page
            .records
            .into_iter()
            .map(|record| restrict_record(record, &exposed))
            .collect();

        Ok(QueryResult {
            table: req.table,
            records,
            offset: page.offset,
        })
    }
}

/// 构造上游查询参数
///
/// 顺序：`filterByFormula`、`maxRecords`、每个字段一个 `fields[]`，
/// 然后是前三个排序条目中有效条目的 `sort[i][field]` / `sort[i][direction]`，
/// `i` 保留条目的原始位置。
pub fn build_params(cfg: &TableConfig, req: &QueryRequest, fields: &[String]) -> QueryParams {
    let mut params = QueryParams::new();

    if let Some(formula) = req.filter_by_formula.as_deref().filter(|f| !f.is_empty()) {
        params.push(("filterByFormula".into(), formula.to_string()));
    }

    params.push((
        "maxRecords".into(),
        RecordLimit::clamp(req.max_records.as_ref()).to_string(),
    ));

    for field in fields {
        params.push(("fields[]".into(), field.clone()));
    }

    for (i, entry) in req.sort.iter().take(MAX_SORT_ENTRIES).enumerate() {
        let Some(field) = entry.field.as_deref().filter(|f| FieldFilter::is_exposed(cfg, f)) else {
            continue;
        };
        params.push((format!("sort[{}][field]", i), field.to_string()));
        params.push((format!("sort[{}][direction]", i), entry.direction().to_string()));
    }

    params
}

/// 移除记录中所有未公开的字段
fn restrict_record(mut record: RecordItem, exposed: &HashSet<&str>) -> RecordItem {
    record.fields.retain(|name, _| exposed.contains(name.as_str()));
    record
}
