//! 处理器与服务测试共用的测试替身

use std::sync::Mutex;

use async_trait::async_trait;
use common::errors::{AppError, AppResult};
use common::models::UpstreamPage;

use crate::upstream::{QueryParams, UpstreamClient};

/// 记录每次调用，并返回预设的数据页或错误
pub struct FakeUpstream {
    pub calls: Mutex<Vec<(String, QueryParams)>>,
    reply: Result<serde_json::Value, String>,
}

impl FakeUpstream {
    pub fn ok(page: serde_json::Value) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            reply: Ok(page),
        }
    }

    pub fn failing(detail: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            reply: Err(detail.to_string()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl UpstreamClient for FakeUpstream {
    async fn list_records(&self, table_id: &str, params: &QueryParams) -> AppResult<UpstreamPage> {
        self.calls
            .lock()
            .unwrap()
            .push((table_id.to_string(), params.clone()));
        match &self.reply {
            Ok(page) => Ok(serde_json::from_value(page.clone()).unwrap()),
            Err(detail) => Err(AppError::Upstream(detail.clone())),
        }
    }
}

