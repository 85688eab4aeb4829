//! Shared building blocks for the table proxy.
//!
//! Holds configuration, error types, middleware, request/response models,
//! the static access control table and the field filtering helpers.

pub mod config;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod tables;
pub mod utils;
