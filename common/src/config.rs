//! Application configuration.
//!
//! Values come from the process environment; an optional `.env` file in the
//! working directory is read first and never overrides variables that are
//! already set.

use std::time::Duration;

/// Default upstream API root.
pub const DEFAULT_UPSTREAM_URL: &str = "https://api.airtable.com";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for the upstream tabular-data API.
#[derive(Clone, Debug)]
pub struct UpstreamConfig {
    /// API root, without trailing slash (e.g. `https://api.airtable.com`).
    pub base_url: String,
    /// Base identifier the proxied tables live in.
    pub base_id: Option<String>,
    /// Personal access token sent as a bearer token.
    pub token: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Top level service configuration.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Secret expected in the `x-api-key` header.
    pub internal_api_key: Option<String>,
    pub upstream: UpstreamConfig,
}

impl AppConfig {
    /// Loads `.env` (best-effort) and then reads the process environment.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: get("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            internal_api_key: get("INTERNAL_API_KEY"),
            upstream: UpstreamConfig {
                base_url: get("AIRTABLE_API_URL")
                    .map(|v| v.trim_end_matches('/').to_string())
                    .unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string()),
                base_id: get("AIRTABLE_BASE_ID"),
                token: get("AIRTABLE_TOKEN"),
                timeout_secs: get("UPSTREAM_TIMEOUT_SECS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            },
        }
    }

    /// Names of required variables that are not set.
    pub fn missing_vars(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.upstream.token.is_none() {
            missing.push("AIRTABLE_TOKEN");
        }
        if self.upstream.base_id.is_none() {
            missing.push("AIRTABLE_BASE_ID");
        }
        if self.internal_api_key.is_none() {
            missing.push("INTERNAL_API_KEY");
        }
        missing
    }

    /// Address string passed to the TCP listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
