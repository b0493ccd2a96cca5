use chrono::NaiveDateTime;
use fadila_ui::Value;
use fadila_ui::widgets::RowKey;
use fadila_ui::widgets::TableRow;
use serde::Deserialize;
use serde::Serialize;

/// An entry in the reception log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visitor {
    pub id: u32,
    pub name: String,
    pub purpose: String,
    pub arrived_at: NaiveDateTime,
    /// Staff member who received the visitor.
    pub host: String,
}

impl TableRow for Visitor {
    fn key(&self) -> Option<RowKey> {
        Some(RowKey::from(self.id))
    }

    fn field(&self, key: &str) -> Value {
        match key {
            "id" => self.id.into(),
            "name" => self.name.as_str().into(),
            "purpose" => self.purpose.as_str().into(),
            "arrived_at" => self.arrived_at.format("%Y-%m-%d %H:%M").to_string().into(),
            "host" => self.host.as_str().into(),
            _ => Value::Null,
        }
    }

    fn values(&self) -> Vec<Value> {
        ["id", "name", "purpose", "arrived_at", "host"]
            .iter()
            .map(|key| self.field(key))
            .collect()
    }
}
