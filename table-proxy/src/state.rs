//! Application state for the table proxy.

use std::sync::Arc;

use common::config::AppConfig;
use common::middleware::ApiKeyAuth;

use crate::upstream::{AirtableClient, UpstreamClient};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub auth: ApiKeyAuth,
    pub upstream: Arc<dyn UpstreamClient>,
}

impl AppState {
    /// Creates the state with the reqwest-backed upstream client.
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let upstream = Arc::new(AirtableClient::new(&config.upstream)?);
        Ok(Self::with_upstream(config, upstream))
    }

    pub fn with_upstream(config: &AppConfig, upstream: Arc<dyn UpstreamClient>) -> Self {
        Self {
            auth: ApiKeyAuth::new(config.internal_api_key.clone()),
            upstream,
        }
    }
}
