//! Middleware components for the proxy.

pub mod auth;
pub mod request_id;

// Re-export commonly used types
pub use auth::{api_key_middleware, ApiKeyAuth, API_KEY_HEADER};
pub use request_id::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
