//! In-memory records the dashboard runs on.

use chrono::NaiveDate;
use chrono::NaiveTime;

use crate::model::ContractType;
use crate::model::EmploymentStatus;
use crate::model::MeetingCalendar;
use crate::model::RegistrationStatus;
use crate::model::Student;
use crate::model::Teacher;
use crate::model::Visitor;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap_or_default()
}

pub fn teachers() -> Vec<Teacher> {
    use ContractType::*;
    use EmploymentStatus::*;

    #[rustfmt::skip]
    let rows: [(u32, &str, &str, &str, &[&str], u32, &str, (i32, u32, u32), EmploymentStatus, ContractType); 10] = [
        (1, "Amina", "Benali", "Mathématiques", &["CM1", "CM2"], 18, "0550 12 34 56", (2015, 9, 1), Active, Permanent),
        (2, "Karim", "Haddad", "Langue arabe", &["CP", "CE1"], 22, "0661 45 78 90", (2018, 9, 3), Active, Permanent),
        (3, "Sofia", "Meziane", "Français", &["CE2", "CM1"], 20, "0770 11 22 33", (2020, 9, 6), Active, FixedTerm),
        (4, "Yacine", "Bouzid", "Sciences", &["CM2"], 12, "0552 98 76 54", (2021, 1, 10), OnLeave, FixedTerm),
        (5, "Leila", "Cherif", "Anglais", &["CE1", "CE2", "CM1", "CM2"], 16, "0663 24 68 10", (2019, 9, 2), Active, Permanent),
        (6, "Omar", "Kaci", "Éducation islamique", &["CP", "CE1", "CE2"], 10, "0771 35 79 13", (2022, 9, 4), Active, Substitute),
        (7, "Nadia", "Saadi", "Histoire-Géographie", &["CM1", "CM2"], 8, "0554 86 42 08", (2017, 9, 1), Departed, FixedTerm),
        (8, "Rachid", "Ait Ali", "Éducation physique", &["CP", "CE1", "CE2", "CM1", "CM2"], 24, "0665 13 57 91", (2016, 9, 5), Active, Permanent),
        (9, "Samira", "Hamdi", "Arts plastiques", &["CP", "CE1"], 6, "0772 02 46 80", (2023, 2, 12), Active, Substitute),
        (10, "Mehdi", "Ferhat", "Informatique", &["CM1", "CM2"], 14, "0556 97 53 19", (2022, 9, 4), Active, FixedTerm),
    ];

    rows.into_iter()
        .map(
            |(id, first, last, subject, levels, hours, phone, (y, m, d), status, contract)| {
                Teacher {
                    id,
                    first_name: first.to_string(),
                    last_name: last.to_string(),
                    subject: subject.to_string(),
                    levels: levels.iter().map(|l| l.to_string()).collect(),
                    weekly_hours: hours,
                    phone: phone.to_string(),
                    email: format!(
                        "{}.{}@elfadila.dz",
                        first.to_lowercase(),
                        last.to_lowercase().replace(' ', "")
                    ),
                    hired_on: date(y, m, d),
                    status,
                    contract,
                }
            },
        )
        .collect()
}

pub fn students() -> Vec<Student> {
    use RegistrationStatus::*;

    #[rustfmt::skip]
    let rows: [(u32, &str, &str, (i32, u32, u32), &str, &str, &str, &str, RegistrationStatus, (i32, u32, u32)); 12] = [
        (101, "Ines", "Belkacem", (2018, 4, 2), "CP", "CP-A", "Farid Belkacem", "0550 20 30 40", Accepted, (2024, 9, 8)),
        (102, "Adam", "Rahmani", (2018, 11, 19), "CP", "CP-B", "Hakima Rahmani", "0661 21 31 41", Accepted, (2024, 9, 8)),
        (103, "Lina", "Touati", (2017, 1, 7), "CE1", "CE1-A", "Mourad Touati", "0770 22 32 42", Accepted, (2023, 9, 10)),
        (104, "Rayan", "Djebbar", (2016, 6, 25), "CE2", "CE2-A", "Nassima Djebbar", "0552 23 33 43", Accepted, (2022, 9, 11)),
        (105, "Maya", "Slimani", (2015, 8, 30), "CM1", "CM1-A", "Kamel Slimani", "0663 24 34 44", Accepted, (2021, 9, 12)),
        (106, "Ilyes", "Zerrouki", (2014, 12, 3), "CM2", "CM2-A", "Salima Zerrouki", "0771 25 35 45", Accepted, (2020, 9, 13)),
        (107, "Sarah", "Guerfi", (2018, 2, 14), "CP", "", "Walid Guerfi", "0554 26 36 46", Pending, (2025, 5, 2)),
        (108, "Anis", "Boudiaf", (2017, 10, 9), "CE1", "", "Lamia Boudiaf", "0665 27 37 47", MeetingScheduled, (2025, 5, 6)),
        (109, "Nour", "Hadjadj", (2016, 3, 21), "CE2", "", "Said Hadjadj", "0772 28 38 48", MeetingScheduled, (2025, 5, 9)),
        (110, "Wassim", "Larbi", (2015, 7, 17), "CM1", "", "Djamila Larbi", "0556 29 39 49", Rejected, (2025, 4, 28)),
        (111, "Aya", "Mebarki", (2014, 5, 5), "CM2", "CM2-B", "Hocine Mebarki", "0667 30 40 50", Accepted, (2024, 9, 8)),
        (112, "Younes", "Ouali", (2018, 9, 12), "CP", "", "Amel Ouali", "0773 31 41 51", Pending, (2025, 5, 14)),
    ];

    rows.into_iter()
        .map(
            |(id, first, last, (by, bm, bd), level, class, guardian, phone, status, (ey, em, ed))| {
                Student {
                    id,
                    first_name: first.to_string(),
                    last_name: last.to_string(),
                    birth_date: date(by, bm, bd),
                    level: level.to_string(),
                    class_name: class.to_string(),
                    guardian_name: guardian.to_string(),
                    guardian_phone: phone.to_string(),
                    registration: status,
                    enrolled_on: date(ey, em, ed),
                }
            },
        )
        .collect()
}

pub fn visitors() -> Vec<Visitor> {
    let rows = [
        (1, "Farid Belkacem", "Réunion parents", (8, 15), "Direction"),
        (2, "Lamia Boudiaf", "Dossier d'inscription", (9, 40), "Secrétariat"),
        (3, "Technicien Sonelgaz", "Maintenance", (10, 5), "Intendance"),
        (4, "Hocine Mebarki", "Certificat de scolarité", (11, 30), "Secrétariat"),
        (5, "Inspecteur académique", "Inspection", (14, 0), "Direction"),
    ];
    let day = date(2025, 5, 12);
    rows.into_iter()
        .map(|(id, name, purpose, (h, m), host)| Visitor {
            id,
            name: name.to_string(),
            purpose: purpose.to_string(),
            arrived_at: day.and_time(time(h, m)),
            host: host.to_string(),
        })
        .collect()
}

/// Two interview days with a few slots already booked by pending applicants.
pub fn meeting_calendar() -> MeetingCalendar {
    let mut calendar = MeetingCalendar::default();
    calendar.generate_day(date(2025, 5, 17), time(9, 0), time(12, 0), 30);
    calendar.generate_day(date(2025, 5, 18), time(13, 30), time(16, 0), 30);

    let bookings = [(2, 108), (4, 109)];
    for (slot, student) in bookings {
        if let Err(e) = calendar.book(slot, student) {
            log::warn!("mock booking failed: {e}");
        }
    }
    for id in 1..=6 {
        let _ = calendar.assign_commission(id, "Commission A");
    }
    for id in 7..=11 {
        let _ = calendar.assign_commission(id, "Commission B");
    }
    calendar
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use fadila_ui::widgets::TableRow;

    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let teacher_ids: HashSet<_> = teachers().iter().map(|t| t.key()).collect();
        assert_eq!(teacher_ids.len(), teachers().len());
        let student_ids: HashSet<_> = students().iter().map(|s| s.key()).collect();
        assert_eq!(student_ids.len(), students().len());
    }

    #[test]
    fn test_weekly_hours_in_range() {
        assert!(teachers()
            .iter()
            .all(|t| crate::quick_assign::WEEKLY_HOURS.contains(&t.weekly_hours)));
    }

    #[test]
    fn test_calendar_bookings() {
        let calendar = meeting_calendar();
        assert_eq!(calendar.slots().len(), 11);
        assert_eq!(calendar.days().len(), 2);
        assert_eq!(calendar.booking_of(108).map(|s| s.id), Some(2));
        assert_eq!(calendar.bookable().count(), 9);
    }

    #[test]
    fn test_email_generation() {
        assert_eq!(teachers()[7].email, "rachid.aitali@elfadila.dz");
    }
}
