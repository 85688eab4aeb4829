//! Query request and result models.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use utoipa::ToSchema;

/// Request body for `POST /query`.
///
/// `fields` and `sort` are decoded leniently: malformed entries are skipped
/// instead of failing the request.
#[derive(Debug, Default, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    /// Table name as listed in the access control table.
    #[serde(default)]
    pub table: String,

    /// Upstream formula used to filter records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_by_formula: Option<String>,

    /// Maximum number of records (clamped to 1..=100, default 50).
    ///
    /// Accepts a number or a numeric string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<u32>)]
    pub max_records: Option<Value>,

    /// Fields to return; all exposed fields when absent, empty or not a list.
    #[serde(default, skip_serializing_if = "FieldSelection::is_all")]
    #[schema(value_type = Option<Vec<String>>)]
    pub fields: FieldSelection,

    /// Sort entries; only the first three are considered.
    #[serde(
        default,
        deserialize_with = "deserialize_sort",
        skip_serializing_if = "Vec::is_empty"
    )]
    #[schema(value_type = Option<Vec<SortSpec>>)]
    pub sort: Vec<SortSpec>,
}

/// Fields requested by the caller.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum FieldSelection {
    /// No list, an empty list, or a value that is not a list.
    #[default]
    All,
    /// Non-empty list; entries that are not strings are dropped.
    Only(Vec<String>),
}

impl FieldSelection {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Array(items) if !items.is_empty() => FieldSelection::Only(
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect(),
            ),
            _ => FieldSelection::All,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, FieldSelection::All)
    }
}

impl<'de> Deserialize<'de> for FieldSelection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(|v| FieldSelection::from_value(&v))
    }
}

impl Serialize for FieldSelection {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FieldSelection::All => serializer.serialize_none(),
            FieldSelection::Only(fields) => fields.serialize(serializer),
        }
    }
}

/// One sort entry.
///
/// Entries keep their position in the request, so a malformed entry is kept
/// with `field: None` rather than removed.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SortSpec {
    pub field: Option<String>,
    /// `"asc"` for ascending; anything else sorts descending.
    pub direction: Option<String>,
}

impl SortSpec {
    /// Reads `field` and `direction` when they are strings.
    pub fn from_value(value: &Value) -> Self {
        let text = |key: &str| value.get(key).and_then(Value::as_str).map(String::from);
        Self {
            field: text("field"),
            direction: text("direction"),
        }
    }
}

/// A non-list `sort` is treated as no sort.
fn deserialize_sort<'de, D>(deserializer: D) -> Result<Vec<SortSpec>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items.iter().map(SortSpec::from_value).collect(),
        _ => Vec::new(),
    })
}

impl SortSpec {
    pub fn direction(&self) -> SortDirection {
        SortDirection::from_input(self.direction.as_deref())
    }
}

/// Sort order sent upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn from_input(input: Option<&str>) -> Self {
        match input {
            Some("asc") => SortDirection::Asc,
            _ => SortDirection::Desc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One upstream record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecordItem {
    /// Upstream record id.
    pub id: String,
    /// Field values keyed by field name.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

/// Response body for `POST /query`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QueryResult {
    /// Table name echoed from the request.
    pub table: String,
    pub records: Vec<RecordItem>,
    /// Pagination token reported upstream, `null` on the last page.
    pub offset: Option<String>,
}

/// Page of records as returned by the upstream list endpoint.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct UpstreamPage {
    #[serde(default)]
    pub records: Vec<RecordItem>,
    #[serde(default)]
    pub offset: Option<String>,
}
