use chrono::NaiveDate;
use fadila_ui::Value;
use fadila_ui::widgets::RowKey;
use fadila_ui::widgets::TableRow;
use serde::Deserialize;
use serde::Serialize;

use crate::i18n::Language;
use crate::i18n::Text;

/// Employment status of a teacher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    #[default]
    Active,
    OnLeave,
    Departed,
}

impl EmploymentStatus {
    /// Stable key stored in the row.
    pub fn key(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::OnLeave => "on_leave",
            Self::Departed => "departed",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "active" => Some(Self::Active),
            "on_leave" => Some(Self::OnLeave),
            "departed" => Some(Self::Departed),
            _ => None,
        }
    }

    pub fn label(self, lang: Language) -> &'static str {
        lang.text(match self {
            Self::Active => Text::StatusActive,
            Self::OnLeave => Text::StatusOnLeave,
            Self::Departed => Text::StatusDeparted,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractType {
    #[default]
    Permanent,
    FixedTerm,
    Substitute,
}

impl ContractType {
    pub fn key(self) -> &'static str {
        match self {
            Self::Permanent => "permanent",
            Self::FixedTerm => "fixed_term",
            Self::Substitute => "substitute",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "permanent" => Some(Self::Permanent),
            "fixed_term" => Some(Self::FixedTerm),
            "substitute" => Some(Self::Substitute),
            _ => None,
        }
    }

    pub fn label(self, lang: Language) -> &'static str {
        lang.text(match self {
            Self::Permanent => Text::ContractPermanent,
            Self::FixedTerm => Text::ContractFixedTerm,
            Self::Substitute => Text::ContractSubstitute,
        })
    }
}

/// A member of the teaching staff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    pub subject: String,
    /// Grade levels taught, e.g. `["CE1", "CE2"]`.
    pub levels: Vec<String>,
    pub weekly_hours: u32,
    pub phone: String,
    pub email: String,
    pub hired_on: NaiveDate,
    #[serde(default)]
    pub status: EmploymentStatus,
    #[serde(default)]
    pub contract: ContractType,
}

impl TableRow for Teacher {
    fn key(&self) -> Option<RowKey> {
        Some(RowKey::from(self.id))
    }

    fn field(&self, key: &str) -> Value {
        match key {
            "id" => self.id.into(),
            "name" => super::full_name(&self.first_name, &self.last_name),
            "first_name" => self.first_name.as_str().into(),
            "last_name" => self.last_name.as_str().into(),
            "subject" => self.subject.as_str().into(),
            "levels" => self.levels.clone().into(),
            "weekly_hours" => self.weekly_hours.into(),
            "phone" => self.phone.as_str().into(),
            "email" => self.email.as_str().into(),
            "hired_on" => self.hired_on.to_string().into(),
            "status" => self.status.key().into(),
            "contract" => self.contract.key().into(),
            _ => Value::Null,
        }
    }

    fn values(&self) -> Vec<Value> {
        TEACHER_FIELDS.iter().map(|key| self.field(key)).collect()
    }
}

/// Every field key a [`Teacher`] row answers to.
pub const TEACHER_FIELDS: &[&str] = &[
    "id",
    "name",
    "first_name",
    "last_name",
    "subject",
    "levels",
    "weekly_hours",
    "phone",
    "email",
    "hired_on",
    "status",
    "contract",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn teacher() -> Teacher {
        Teacher {
            id: 7,
            first_name: "Amina".into(),
            last_name: "Benali".into(),
            subject: "Mathématiques".into(),
            levels: vec!["CM1".into(), "CM2".into()],
            weekly_hours: 18,
            phone: "0550 12 34 56".into(),
            email: "a.benali@elfadila.dz".into(),
            hired_on: NaiveDate::from_ymd_opt(2019, 9, 1).unwrap(),
            status: EmploymentStatus::Active,
            contract: ContractType::Permanent,
        }
    }

    #[test]
    fn test_fields() {
        let t = teacher();
        assert_eq!(t.key(), Some(RowKey::from("7")));
        assert_eq!(t.field("name").to_string(), "Amina Benali");
        assert_eq!(t.field("levels").to_string(), "CM1,CM2");
        assert_eq!(t.field("hired_on").to_string(), "2019-09-01");
        assert!(t.field("salary").is_null());
        assert_eq!(t.values().len(), TEACHER_FIELDS.len());
    }

    #[test]
    fn test_status_keys_round_trip() {
        for status in [
            EmploymentStatus::Active,
            EmploymentStatus::OnLeave,
            EmploymentStatus::Departed,
        ] {
            assert_eq!(EmploymentStatus::from_key(status.key()), Some(status));
        }
        assert_eq!(EmploymentStatus::OnLeave.label(Language::En), "On leave");
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{"id":1,"firstName":"Karim","lastName":"Haddad","subject":"Arabe",
            "levels":["CP"],"weeklyHours":20,"phone":"","email":"","hiredOn":"2021-09-05"}"#;
        let t: Teacher = serde_json::from_str(json).unwrap();
        assert_eq!(t.weekly_hours, 20);
        assert_eq!(t.status, EmploymentStatus::Active);
    }
}
