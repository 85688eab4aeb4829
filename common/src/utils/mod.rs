//! Utility functions and helpers.

pub mod field_filter;
pub mod record_limit;

// Re-export commonly used types
pub use field_filter::FieldFilter;
pub use record_limit::RecordLimit;
