//! TableRow trait and row identity.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::value::Value;

/// Stable identity of a row, taken from its `id` field.
///
/// Selection is tracked by key so it survives filtering and sorting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowKey(String);

impl RowKey {
    /// Create a key from anything string-like.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Borrow the key text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RowKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for RowKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<u32> for RowKey {
    fn from(key: u32) -> Self {
        Self(key.to_string())
    }
}

impl From<i64> for RowKey {
    fn from(key: i64) -> Self {
        Self(key.to_string())
    }
}

/// Trait for anything the [`DataTable`](super::DataTable) can display.
///
/// The table only reads rows: it asks for the value behind a column key,
/// for every value when searching, and for the key when selecting.
///
/// # Example
///
/// ```
/// use fadila_ui::Value;
/// use fadila_ui::widgets::{RowKey, TableRow};
///
/// struct Subject {
///     id: u32,
///     name: String,
/// }
///
/// impl TableRow for Subject {
///     fn key(&self) -> Option<RowKey> {
///         Some(self.id.into())
///     }
///
///     fn field(&self, key: &str) -> Value {
///         match key {
///             "id" => self.id.into(),
///             "name" => self.name.as_str().into(),
///             _ => Value::Null,
///         }
///     }
///
///     fn values(&self) -> Vec<Value> {
///         vec![self.id.into(), self.name.as_str().into()]
///     }
/// }
/// ```
pub trait TableRow {
    /// Stable identifier, or `None` when the row has no `id`.
    fn key(&self) -> Option<RowKey>;

    /// Value for the field named by a column key; `Value::Null` if absent.
    fn field(&self, key: &str) -> Value;

    /// Every field of the row, used by the default search.
    fn values(&self) -> Vec<Value>;
}
