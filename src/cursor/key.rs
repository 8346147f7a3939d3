//! Ordering keys and cursor positions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Value of the ordering field of an item
///
/// Variants compare in declaration order first, then by their contents, so
/// keys of mixed kinds still form a total order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderingKey {
    /// Missing or null field
    Null,
    /// Integer key (ids, sequence numbers)
    Int(i64),
    /// Timestamp key (created/updated columns)
    Timestamp(DateTime<Utc>),
    /// Text key
    Text(String),
    /// Multi-column key, compared lexicographically
    Composite(Vec<OrderingKey>),
}

impl OrderingKey {
    /// Derive an ordering key from a JSON value
    ///
    /// RFC 3339 strings become timestamps. Numbers that do not fit an `i64`
    /// fall back to their textual form.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Int(i64::from(*b)),
            Value::Number(n) => n
                .as_i64()
                .map_or_else(|| Self::Text(n.to_string()), Self::Int),
            Value::String(s) => DateTime::parse_from_rfc3339(s).map_or_else(
                |_| Self::Text(s.clone()),
                |ts| Self::Timestamp(ts.with_timezone(&Utc)),
            ),
            Value::Array(values) => Self::Composite(values.iter().map(Self::from_json).collect()),
            Value::Object(_) => Self::Text(value.to_string()),
        }
    }

    /// Ordering key of a JSON object's field (`Null` when absent)
    pub fn from_json_field(item: &Value, field: &str) -> Self {
        item.get(field).map_or(Self::Null, Self::from_json)
    }
}

impl From<i64> for OrderingKey {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for OrderingKey {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for OrderingKey {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for OrderingKey {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for OrderingKey {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<DateTime<Utc>> for OrderingKey {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

impl<K: Into<OrderingKey>> From<Vec<K>> for OrderingKey {
    fn from(values: Vec<K>) -> Self {
        Self::Composite(values.into_iter().map(Into::into).collect())
    }
}

/// A traversal position in ordering-key space
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cursor {
    /// Key to continue from; `None` is the start (forward) or end (reverse)
    #[serde(rename = "p", default, skip_serializing_if = "Option::is_none")]
    pub position: Option<OrderingKey>,
    /// Walk towards the start of the result set
    #[serde(rename = "r", default, skip_serializing_if = "is_false")]
    pub reverse: bool,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !*value
}

impl Cursor {
    /// Position before the first item
    pub fn start() -> Self {
        Self::default()
    }

    /// Position after the last item, walking backwards
    pub fn end() -> Self {
        Self {
            position: None,
            reverse: true,
        }
    }

    /// Continue forward with items strictly after `key`
    pub fn after(key: impl Into<OrderingKey>) -> Self {
        Self {
            position: Some(key.into()),
            reverse: false,
        }
    }

    /// Continue backward with items strictly before `key`
    pub fn before(key: impl Into<OrderingKey>) -> Self {
        Self {
            position: Some(key.into()),
            reverse: true,
        }
    }

    /// Check if this cursor is the forward start position
    pub fn is_start(&self) -> bool {
        self.position.is_none() && !self.reverse
    }
}
