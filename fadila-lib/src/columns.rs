//! Column sets for the dashboard pages
//!
//! Each page has a default column array and a pool of extra columns the user
//! can add from the picker, grouped by category. Labels follow the interface
//! language; enum-valued cells render their localized label.

use fadila_ui::widgets::Alignment;
use fadila_ui::widgets::Column;

use crate::i18n::Language;
use crate::i18n::Text;
use crate::model::ContractType;
use crate::model::EmploymentStatus;
use crate::model::RegistrationStatus;

fn column(lang: Language, key: &str, text: Text) -> Column {
    Column::new(key, lang.text(text))
}

pub fn teacher_columns(lang: Language) -> Vec<Column> {
    vec![
        column(lang, "id", Text::ColId).width(70).align(Alignment::Right),
        column(lang, "name", Text::ColName).width(200),
        column(lang, "subject", Text::ColSubject).width(180),
        column(lang, "levels", Text::ColLevels).unsortable(),
        column(lang, "weekly_hours", Text::ColWeeklyHours)
            .width(120)
            .align(Alignment::Right)
            .render(move |value, _, _| match value.as_f64() {
                Some(hours) if hours >= 0.0 => lang.hours(hours as u32),
                _ => value.to_string(),
            }),
        column(lang, "status", Text::ColStatus)
            .width(110)
            .align(Alignment::Center)
            .render(move |value, _, _| {
                value
                    .as_str()
                    .and_then(EmploymentStatus::from_key)
                    .map_or_else(|| value.to_string(), |s| s.label(lang).to_string())
            }),
    ]
}

pub fn teacher_extra_columns(lang: Language) -> Vec<Column> {
    let contact = lang.text(Text::CatContact);
    let admin = lang.text(Text::CatAdministrative);
    vec![
        column(lang, "phone", Text::ColPhone).hidden().category(contact),
        column(lang, "email", Text::ColEmail)
            .width(220)
            .hidden()
            .category(contact),
        column(lang, "hired_on", Text::ColHiredOn)
            .width(130)
            .hidden()
            .category(admin),
        column(lang, "contract", Text::ColContract)
            .hidden()
            .category(admin)
            .render(move |value, _, _| {
                value
                    .as_str()
                    .and_then(ContractType::from_key)
                    .map_or_else(|| value.to_string(), |c| c.label(lang).to_string())
            }),
    ]
}

pub fn student_columns(lang: Language) -> Vec<Column> {
    vec![
        column(lang, "id", Text::ColId).width(70).align(Alignment::Right),
        column(lang, "name", Text::ColName).width(200),
        column(lang, "level", Text::ColLevel).width(90).align(Alignment::Center),
        column(lang, "class", Text::ColClass).width(100),
        column(lang, "registration", Text::ColRegistration)
            .width(170)
            .render(move |value, _, _| {
                value
                    .as_str()
                    .and_then(RegistrationStatus::from_key)
                    .map_or_else(|| value.to_string(), |s| s.label(lang).to_string())
            }),
    ]
}

pub fn student_extra_columns(lang: Language) -> Vec<Column> {
    let family = lang.text(Text::CatFamily);
    let admin = lang.text(Text::CatAdministrative);
    vec![
        column(lang, "guardian", Text::ColGuardian)
            .width(180)
            .hidden()
            .category(family),
        column(lang, "guardian_phone", Text::ColGuardianPhone)
            .hidden()
            .category(family),
        column(lang, "birth_date", Text::ColBirthDate)
            .width(130)
            .hidden()
            .category(admin),
        column(lang, "enrolled_on", Text::ColEnrolledOn)
            .width(130)
            .hidden()
            .category(admin),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use fadila_ui::widgets::TableRow;

    use super::*;
    use crate::mock;

    #[test]
    fn test_keys_are_disjoint() {
        for lang in Language::ALL {
            for (defaults, extras) in [
                (teacher_columns(lang), teacher_extra_columns(lang)),
                (student_columns(lang), student_extra_columns(lang)),
            ] {
                let mut keys = HashSet::new();
                for c in defaults.iter().chain(&extras) {
                    assert!(keys.insert(c.key.clone()), "duplicate {}", c.key);
                }
                assert!(extras.iter().all(|c| !c.visible && c.category.is_some()));
            }
        }
    }

    #[test]
    fn test_every_column_reads_a_field() {
        let teacher = &mock::teachers()[0];
        for c in teacher_columns(Language::En)
            .iter()
            .chain(&teacher_extra_columns(Language::En))
        {
            assert!(!teacher.field(&c.key).is_null(), "teacher.{}", c.key);
        }
        let student = &mock::students()[0];
        for c in student_columns(Language::En)
            .iter()
            .chain(&student_extra_columns(Language::En))
        {
            assert!(!student.field(&c.key).is_null(), "student.{}", c.key);
        }
    }

    #[test]
    fn test_localized_renderers() {
        let teacher = &mock::teachers()[3];
        let columns = teacher_columns(Language::Fr);
        let status = columns.iter().find(|c| c.key == "status").unwrap();
        assert_eq!(status.cell_text(teacher, 0), "En congé");
        let hours = columns.iter().find(|c| c.key == "weekly_hours").unwrap();
        assert_eq!(hours.cell_text(teacher, 0), "12 h");
    }
}
