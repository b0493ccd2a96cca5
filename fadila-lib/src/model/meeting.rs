use chrono::Duration;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::NaiveTime;
use fadila_ui::Value;
use fadila_ui::widgets::RowKey;
use fadila_ui::widgets::TableRow;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ScheduleError;

/// One registration interview slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingSlot {
    pub id: u32,
    pub starts_at: NaiveDateTime,
    pub duration_minutes: u32,
    /// Whether families may book this slot.
    pub open: bool,
    /// Student ID holding the slot.
    pub booked_by: Option<u32>,
    /// Admission commission conducting the interview.
    pub commission: Option<String>,
}

impl MeetingSlot {
    pub fn ends_at(&self) -> NaiveDateTime {
        self.starts_at + Duration::minutes(i64::from(self.duration_minutes))
    }

    pub fn is_bookable(&self) -> bool {
        self.open && self.booked_by.is_none()
    }
}

impl TableRow for MeetingSlot {
    fn key(&self) -> Option<RowKey> {
        Some(RowKey::from(self.id))
    }

    fn field(&self, key: &str) -> Value {
        match key {
            "id" => self.id.into(),
            "date" => self.starts_at.date().to_string().into(),
            "time" => format!(
                "{}-{}",
                self.starts_at.format("%H:%M"),
                self.ends_at().format("%H:%M")
            )
            .into(),
            "open" => self.open.into(),
            "booked_by" => self.booked_by.into(),
            "commission" => self.commission.clone().into(),
            _ => Value::Null,
        }
    }

    fn values(&self) -> Vec<Value> {
        ["id", "date", "time", "open", "booked_by", "commission"]
            .iter()
            .map(|key| self.field(key))
            .collect()
    }
}

/// Registration meeting slots, ordered by start time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingCalendar {
    slots: Vec<MeetingSlot>,
}

impl MeetingCalendar {
    pub fn new(mut slots: Vec<MeetingSlot>) -> Self {
        slots.sort_by_key(|s| (s.starts_at, s.id));
        Self { slots }
    }

    /// Generate open slots every `step` minutes from `start` until `end` on `day`.
    ///
    /// Slot IDs continue from the highest existing ID. Returns the number added.
    pub fn generate_day(
        &mut self,
        day: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        step_minutes: u32,
    ) -> usize {
        if step_minutes == 0 {
            return 0;
        }
        let mut next_id = self.slots.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        let step = Duration::minutes(i64::from(step_minutes));
        let last = day.and_time(end);
        let mut at = day.and_time(start);
        let mut added = 0;
        while at + step <= last {
            if !self.slots.iter().any(|s| s.starts_at == at) {
                self.slots.push(MeetingSlot {
                    id: next_id,
                    starts_at: at,
                    duration_minutes: step_minutes,
                    open: true,
                    booked_by: None,
                    commission: None,
                });
                next_id += 1;
                added += 1;
            }
            at += step;
        }
        self.slots.sort_by_key(|s| (s.starts_at, s.id));
        log::debug!("generated {added} meeting slots on {day}");
        added
    }

    pub fn slots(&self) -> &[MeetingSlot] {
        &self.slots
    }

    pub fn get(&self, id: u32) -> Option<&MeetingSlot> {
        self.slots.iter().find(|s| s.id == id)
    }

    fn get_mut(&mut self, id: u32) -> Result<&mut MeetingSlot, ScheduleError> {
        self.slots
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(ScheduleError::UnknownSlot(id))
    }

    /// Distinct days that have slots, ascending.
    pub fn days(&self) -> Vec<NaiveDate> {
        let mut days: Vec<NaiveDate> = self.slots.iter().map(|s| s.starts_at.date()).collect();
        days.dedup();
        days
    }

    pub fn on_day(&self, day: NaiveDate) -> impl Iterator<Item = &MeetingSlot> {
        self.slots.iter().filter(move |s| s.starts_at.date() == day)
    }

    pub fn bookable(&self) -> impl Iterator<Item = &MeetingSlot> {
        self.slots.iter().filter(|s| s.is_bookable())
    }

    /// Open or close a slot. Returns the new `open` state.
    ///
    /// Closing a booked slot fails with [`ScheduleError::HasBooking`].
    pub fn toggle(&mut self, id: u32) -> Result<bool, ScheduleError> {
        let slot = self.get_mut(id)?;
        if slot.open && slot.booked_by.is_some() {
            log::warn!("refusing to close booked slot #{id}");
            return Err(ScheduleError::HasBooking(slot.starts_at));
        }
        slot.open = !slot.open;
        log::debug!("slot #{id} open={}", slot.open);
        Ok(slot.open)
    }

    /// Reserve a slot for a student.
    pub fn book(&mut self, id: u32, student: u32) -> Result<(), ScheduleError> {
        let slot = self.get_mut(id)?;
        if let Some(holder) = slot.booked_by {
            return Err(ScheduleError::AlreadyBooked {
                at: slot.starts_at,
                student: holder,
            });
        }
        if !slot.open {
            return Err(ScheduleError::Unavailable(slot.starts_at));
        }
        slot.booked_by = Some(student);
        log::debug!("slot #{id} booked by student #{student}");
        Ok(())
    }

    /// Release a booking. Returns the student that held it.
    pub fn cancel(&mut self, id: u32) -> Result<Option<u32>, ScheduleError> {
        let slot = self.get_mut(id)?;
        Ok(slot.booked_by.take())
    }

    /// Assign the commission conducting a slot's interview.
    pub fn assign_commission(
        &mut self,
        id: u32,
        commission: impl Into<String>,
    ) -> Result<(), ScheduleError> {
        self.get_mut(id)?.commission = Some(commission.into());
        Ok(())
    }

    /// Slot booked by a student, if any.
    pub fn booking_of(&self, student: u32) -> Option<&MeetingSlot> {
        self.slots.iter().find(|s| s.booked_by == Some(student))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calendar() -> MeetingCalendar {
        let mut cal = MeetingCalendar::default();
        cal.generate_day(
            NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            30,
        );
        cal
    }

    #[test]
    fn test_generate_day() {
        let cal = calendar();
        assert_eq!(cal.slots().len(), 4);
        assert_eq!(cal.slots()[3].ends_at().time(), NaiveTime::from_hms_opt(11, 0, 0).unwrap());
        assert_eq!(cal.days().len(), 1);
    }

    #[test]
    fn test_generate_skips_existing_starts() {
        let mut cal = calendar();
        let added = cal.generate_day(
            NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            30,
        );
        assert_eq!(added, 2);
        assert_eq!(cal.slots().len(), 6);
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut cal = calendar();
        let before = cal.clone();
        assert!(!cal.toggle(1).unwrap());
        assert!(cal.toggle(1).unwrap());
        assert_eq!(cal, before);
    }

    #[test]
    fn test_book_booked_slot_fails() {
        let mut cal = calendar();
        cal.book(2, 100).unwrap();
        assert!(matches!(
            cal.book(2, 101),
            Err(ScheduleError::AlreadyBooked { student: 100, .. })
        ));
        assert_eq!(cal.booking_of(100).map(|s| s.id), Some(2));
    }

    #[test]
    fn test_closed_slot_cannot_be_booked() {
        let mut cal = calendar();
        cal.toggle(3).unwrap();
        assert!(matches!(cal.book(3, 1), Err(ScheduleError::Unavailable(_))));
    }

    #[test]
    fn test_booked_slot_cannot_be_closed() {
        let mut cal = calendar();
        cal.book(1, 5).unwrap();
        assert!(matches!(cal.toggle(1), Err(ScheduleError::HasBooking(_))));
        assert_eq!(cal.cancel(1).unwrap(), Some(5));
        assert!(!cal.toggle(1).unwrap());
    }

    #[test]
    fn test_slot_fields() {
        let mut cal = calendar();
        cal.book(1, 42).unwrap();
        let slot = cal.get(1).unwrap();
        assert_eq!(slot.field("time").to_string(), "09:00-09:30");
        assert_eq!(slot.field("booked_by").to_string(), "42");
        assert!(cal.get(2).unwrap().field("booked_by").is_null());
    }

    #[test]
    fn test_unknown_slot() {
        let mut cal = calendar();
        assert_eq!(cal.toggle(99), Err(ScheduleError::UnknownSlot(99)));
    }
}
