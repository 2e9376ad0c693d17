//! Row shapes and query fragments spoken to the hosted REST collection.

use serde::{Deserialize, Serialize};

use crate::domain::TaskId;

pub const DEFAULT_TABLE: &str = "tasks";
pub const REST_PREFIX: &str = "rest/v1";
pub const ORDER_BY_CREATED_ASC: &str = "created_at.asc";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTaskRow {
    pub title: String,
    pub completed: bool,
}

impl NewTaskRow {
    pub fn pending(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            completed: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedPatch {
    pub completed: bool,
}

/// Error body returned by the hosted REST layer on non-2xx responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoteErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

pub fn eq_filter(id: &TaskId) -> String {
    format!("eq.{}", id.as_str())
}

pub fn in_filter(ids: &[TaskId]) -> String {
    let values: Vec<String> = ids.iter().map(|id| quote_value(id.as_str())).collect();
    format!("in.({})", values.join(","))
}

// List members containing reserved delimiters must be double-quoted.
fn quote_value(raw: &str) -> String {
    if raw.contains([',', '(', ')', '"']) {
        format!("\"{}\"", raw.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        raw.to_string()
    }
}
