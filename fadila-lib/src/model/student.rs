use chrono::NaiveDate;
use fadila_ui::Value;
use fadila_ui::widgets::RowKey;
use fadila_ui::widgets::TableRow;
use serde::Deserialize;
use serde::Serialize;

use crate::i18n::Language;
use crate::i18n::Text;

/// Where a student stands in the registration workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    #[default]
    Pending,
    MeetingScheduled,
    Accepted,
    Rejected,
}

impl RegistrationStatus {
    pub fn key(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::MeetingScheduled => "meeting_scheduled",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "pending" => Some(Self::Pending),
            "meeting_scheduled" => Some(Self::MeetingScheduled),
            "accepted" => Some(Self::Accepted),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    pub fn label(self, lang: Language) -> &'static str {
        lang.text(match self {
            Self::Pending => Text::RegPending,
            Self::MeetingScheduled => Text::RegMeeting,
            Self::Accepted => Text::RegAccepted,
            Self::Rejected => Text::RegRejected,
        })
    }
}

/// A pupil, enrolled or applying.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    /// Grade level, e.g. `CP` or `CM2`.
    pub level: String,
    /// Class group within the level, empty until accepted.
    #[serde(default)]
    pub class_name: String,
    pub guardian_name: String,
    pub guardian_phone: String,
    #[serde(default)]
    pub registration: RegistrationStatus,
    pub enrolled_on: NaiveDate,
}

impl TableRow for Student {
    fn key(&self) -> Option<RowKey> {
        Some(RowKey::from(self.id))
    }

    fn field(&self, key: &str) -> Value {
        match key {
            "id" => self.id.into(),
            "name" => super::full_name(&self.first_name, &self.last_name),
            "first_name" => self.first_name.as_str().into(),
            "last_name" => self.last_name.as_str().into(),
            "birth_date" => self.birth_date.to_string().into(),
            "level" => self.level.as_str().into(),
            "class" => self.class_name.as_str().into(),
            "guardian" => self.guardian_name.as_str().into(),
            "guardian_phone" => self.guardian_phone.as_str().into(),
            "registration" => self.registration.key().into(),
            "enrolled_on" => self.enrolled_on.to_string().into(),
            _ => Value::Null,
        }
    }

    fn values(&self) -> Vec<Value> {
        STUDENT_FIELDS.iter().map(|key| self.field(key)).collect()
    }
}

/// Every field key a [`Student`] row answers to.
pub const STUDENT_FIELDS: &[&str] = &[
    "id",
    "name",
    "first_name",
    "last_name",
    "birth_date",
    "level",
    "class",
    "guardian",
    "guardian_phone",
    "registration",
    "enrolled_on",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields() {
        let s = Student {
            id: 31,
            first_name: "Yacine".into(),
            last_name: "Mansouri".into(),
            birth_date: NaiveDate::from_ymd_opt(2017, 3, 14).unwrap(),
            level: "CE1".into(),
            class_name: "CE1-B".into(),
            guardian_name: "Rachid Mansouri".into(),
            guardian_phone: "0661 00 11 22".into(),
            registration: RegistrationStatus::Accepted,
            enrolled_on: NaiveDate::from_ymd_opt(2023, 9, 10).unwrap(),
        };
        assert_eq!(s.field("class").to_string(), "CE1-B");
        assert_eq!(s.field("registration").to_string(), "accepted");
        assert!(s.values().iter().any(|v| v.to_string() == "Yacine Mansouri"));
    }

    #[test]
    fn test_registration_labels() {
        assert_eq!(
            RegistrationStatus::from_key("meeting_scheduled"),
            Some(RegistrationStatus::MeetingScheduled)
        );
        assert_eq!(RegistrationStatus::Rejected.label(Language::Fr), "Refusé");
        assert_eq!(RegistrationStatus::from_key("unknown"), None);
    }
}
