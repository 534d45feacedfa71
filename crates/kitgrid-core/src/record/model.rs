//! Record domain model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Stable identifier of a record, unique within one dataset snapshot.
pub type RecordId = i64;

/// Column name of the primary status field.
pub const STORE_REQUEST_STATUS: &str = "StoreRequestStatus";
/// Column name of the secondary status field.
pub const OPERATION_ORDER_STATUS: &str = "OperationOrderStatus";

/// One business entity as delivered by the list fetch.
///
/// The dataset fetch owns the canonical copy; the grid and the selection
/// store only ever hold clones of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Record {
    pub id: RecordId,
    #[serde(default)]
    pub store_request_status: Option<String>,
    #[serde(default)]
    pub operation_order_status: Option<String>,
    /// Display-only columns (requester, project, dates, ...).
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Record {
    pub fn new(id: RecordId) -> Self {
        Self {
            id,
            store_request_status: None,
            operation_order_status: None,
            fields: Map::new(),
        }
    }

    /// Builder-style setter for both status fields.
    pub fn with_statuses(mut self, primary: &str, secondary: Option<&str>) -> Self {
        self.store_request_status = Some(primary.to_string());
        self.operation_order_status = secondary.map(str::to_string);
        self
    }

    /// Builder-style setter for a display column.
    pub fn with_field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    /// Returns the value rendered in `column`, including the typed columns.
    pub fn column_value(&self, column: &str) -> Option<Value> {
        match column {
            "Id" => Some(Value::from(self.id)),
            STORE_REQUEST_STATUS => self.store_request_status.clone().map(Value::String),
            OPERATION_ORDER_STATUS => self.operation_order_status.clone().map(Value::String),
            other => self.fields.get(other).filter(|v| !v.is_null()).cloned(),
        }
    }

    /// Returns a display column as text, if it is a string or a number.
    pub fn text_field(&self, column: &str) -> Option<String> {
        match self.column_value(column)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Case-insensitive substring match over the id, statuses and scalar fields.
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        let hit = |haystack: &str| haystack.to_lowercase().contains(&needle);

        hit(&self.id.to_string())
            || self.store_request_status.as_deref().is_some_and(hit)
            || self.operation_order_status.as_deref().is_some_and(hit)
            || self.fields.values().any(|value| match value {
                Value::String(s) => hit(s),
                Value::Number(n) => hit(&n.to_string()),
                _ => false,
            })
    }
}
