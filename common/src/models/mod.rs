//! Shared data models.

pub mod query;
pub mod table;

// Re-export commonly used types
pub use query::{FieldSelection, QueryRequest, QueryResult, RecordItem, SortDirection, SortSpec, UpstreamPage};
pub use table::TableConfig;
