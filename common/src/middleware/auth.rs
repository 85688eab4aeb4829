//! Authentication middleware.
//!
//! Requests must carry the internal secret in the `x-api-key` header.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header::HeaderName, Request},
    middleware::Next,
    response::Response,
};

use crate::errors::AppError;

/// Header carrying the internal API key.
pub static API_KEY_HEADER: HeaderName = HeaderName::from_static("x-api-key");

/// Expected API key, shared by every request.
///
/// When no key is configured every request is rejected.
#[derive(Clone, Debug)]
pub struct ApiKeyAuth {
    expected: Option<Arc<str>>,
}

impl ApiKeyAuth {
    pub fn new(expected: Option<String>) -> Self {
        Self {
            expected: expected.map(Arc::from),
        }
    }

    /// Returns `true` when `provided` matches the configured key.
    pub fn verify(&self, provided: Option<&str>) -> bool {
        match (self.expected.as_deref(), provided) {
            (Some(expected), Some(provided)) => expected == provided,
            _ => false,
        }
    }
}

/// Authentication middleware handler.
///
/// Rejects with `401 {"error":"Unauthorized"}` before the request body is
/// read or any downstream work is done.
pub async fn api_key_middleware(
    State(auth): State<ApiKeyAuth>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    if !auth.verify(extract_api_key(&req)) {
        return Err(AppError::Unauthorized);
    }
    Ok(next.run(req).await)
}

/// Extract the API key from the `x-api-key` header.
pub fn extract_api_key(req: &Request<Body>) -> Option<&str> {
    req.headers()
        .get(&API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
}
