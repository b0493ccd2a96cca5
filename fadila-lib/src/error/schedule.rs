//! Meeting calendar error types

use chrono::NaiveDateTime;

/// Errors from booking registration meeting slots.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    /// No slot with this ID.
    #[error("unknown slot #{0}")]
    UnknownSlot(u32),

    /// Slot was closed by the administration.
    #[error("slot at {0} is not open")]
    Unavailable(NaiveDateTime),

    /// Someone already holds the slot.
    #[error("slot at {at} is already booked by student #{student}")]
    AlreadyBooked {
        at: NaiveDateTime,
        student: u32,
    },

    /// A booked slot cannot be closed.
    #[error("slot at {0} has a booking")]
    HasBooking(NaiveDateTime),
}
