//! Inline weekly-hours editor
//!
//! The teachers table lets staff change a teacher's weekly hours from a
//! popover. Input is validated before anything is written back; on failure
//! the editor stays open with the error so the front end can flag it.

use std::ops::RangeInclusive;

use crate::error::ValidationError;
use crate::model::Teacher;

/// Accepted weekly teaching hours.
pub const WEEKLY_HOURS: RangeInclusive<u32> = 1..=40;

const FIELD: &str = "weekly_hours";

/// Parse and range-check a weekly-hours entry.
pub fn parse_weekly_hours(input: &str) -> Result<u32, ValidationError> {
    let trimmed = input.trim();
    let value: i64 = trimmed.parse().map_err(|_| ValidationError::NotANumber {
        field: FIELD.to_string(),
        input: input.to_string(),
    })?;

    let (min, max) = (*WEEKLY_HOURS.start(), *WEEKLY_HOURS.end());
    match u32::try_from(value) {
        Ok(hours) if WEEKLY_HOURS.contains(&hours) => Ok(hours),
        _ => Err(ValidationError::OutOfRange {
            field: FIELD.to_string(),
            value,
            min: i64::from(min),
            max: i64::from(max),
        }),
    }
}

/// Open popover editing one teacher's hours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickAssign {
    teacher_id: u32,
    draft: String,
    error: Option<ValidationError>,
}

impl QuickAssign {
    /// Open the editor prefilled with the teacher's current hours.
    pub fn open(teacher: &Teacher) -> Self {
        Self {
            teacher_id: teacher.id,
            draft: teacher.weekly_hours.to_string(),
            error: None,
        }
    }

    pub fn teacher_id(&self) -> u32 {
        self.teacher_id
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replace the typed text. Clears a previous error.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
        self.error = None;
    }

    /// Error from the last submit, if it was rejected.
    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    /// Validate the draft and write it to the matching teacher.
    ///
    /// On error nothing is modified and the editor keeps the error.
    pub fn submit(&mut self, teachers: &mut [Teacher]) -> Result<u32, ValidationError> {
        let result = parse_weekly_hours(&self.draft).and_then(|hours| {
            let teacher = teachers
                .iter_mut()
                .find(|t| t.id == self.teacher_id)
                .ok_or(ValidationError::UnknownRecord {
                    entity: "teacher",
                    id: self.teacher_id,
                })?;
            teacher.weekly_hours = hours;
            Ok(hours)
        });

        match &result {
            Ok(hours) => {
                log::debug!("teacher #{} weekly hours set to {hours}", self.teacher_id);
                self.error = None;
            }
            Err(e) => {
                log::warn!("quick assign rejected: {e}");
                self.error = Some(e.clone());
            }
        }
        result
    }
}
