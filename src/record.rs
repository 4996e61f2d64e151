// SPDX-License-Identifier: MPL-2.0

//! Record type for cascade datasets.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single row of a cascade dataset.
///
/// Records are schemaless JSON objects; the engine only cares about the
/// value, display text, and parent reference fields, addressed by the
/// names configured in [`CascadeConfig`](crate::CascadeConfig). Any other
/// fields are carried along untouched.
///
/// The `transparent` representation lets a whole dataset deserialize
/// straight from a JSON array payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Creates a record from raw JSON object fields.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Raw access to a field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Reads a field as a string, coercing scalar values.
    ///
    /// Strings are returned as-is, numbers and booleans via their display
    /// form, so a numeric id in the payload compares equal to its string
    /// spelling. Missing fields, `null`, and structured values yield `None`.
    pub fn field_str(&self, field: &str) -> Option<String> {
        match self.0.get(field)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

impl TryFrom<Value> for Record {
    type Error = Value;

    /// Accepts JSON objects; anything else is handed back unchanged.
    fn try_from(value: Value) -> Result<Self, Value> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(other),
        }
    }
}
