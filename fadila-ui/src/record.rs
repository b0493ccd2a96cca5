//! Generic row record

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use crate::value::Value;
use crate::widgets::{RowKey, TableRow};

/// Name of the field that carries a record's identity.
pub const ID_FIELD: &str = "id";

/// A plain row of named values.
///
/// Records are the generic row type for data that arrives untyped, such as
/// the students-organization JSON payload. The table reads fields by column
/// key and never mutates them.
///
/// # Example
///
/// ```
/// use fadila_ui::Record;
/// use fadila_ui::widgets::TableRow;
///
/// let row = Record::new().set("id", 1).set("name", "Yacine");
/// assert_eq!(row.field("name").to_string(), "Yacine");
/// assert_eq!(row.key().map(|k| k.to_string()), Some("1".to_string()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "serde_json::Map<String, serde_json::Value>",
    into = "HashMap<String, Value>"
)]
pub struct Record {
    fields: HashMap<String, Value>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `true` if the record contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }
}

impl TableRow for Record {
    fn key(&self) -> Option<RowKey> {
        match self.fields.get(ID_FIELD) {
            None | Some(Value::Null) => None,
            Some(id) => Some(RowKey::new(id.to_string())),
        }
    }

    fn field(&self, key: &str) -> Value {
        self.fields.get(key).cloned().unwrap_or_default()
    }

    fn values(&self) -> Vec<Value> {
        self.fields.values().cloned().collect()
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Record {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        Self {
            fields: map.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
        }
    }
}

impl From<Record> for HashMap<String, Value> {
    fn from(record: Record) -> Self {
        record.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_object() {
        let json = r#"{"id": 7, "name": "Salma", "level": "3AP", "meta": {"room": 2}}"#;
        let record: Record = serde_json::from_str(json).unwrap();

        assert_eq!(record.key(), Some(RowKey::new("7")));
        assert_eq!(record.field("name"), Value::from("Salma"));
        assert_eq!(record.field("meta"), Value::from(r#"{"room":2}"#));
        assert!(record.field("missing").is_null());
    }

    #[test]
    fn test_null_id_has_no_key() {
        let record = Record::new().set("id", Value::Null).set("name", "x");
        assert_eq!(record.key(), None);
    }
}
