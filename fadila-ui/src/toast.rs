//! Toast notifications.
//!
//! Each toast is shown for [`DEFAULT_TOAST_DURATION`], then plays an exit
//! animation for [`TOAST_EXIT_DURATION`] before it is dropped. Toasts time
//! out independently; the only way to cut one short is [`ToastQueue::close`].
//! Time is passed in by the host so the queue stays deterministic.

use std::time::{Duration, Instant};

/// How long a toast stays fully visible.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(3);

/// Length of the exit animation.
pub const TOAST_EXIT_DURATION: Duration = Duration::from_millis(200);

/// Severity of a toast, used by front ends to pick an accent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastLevel {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

/// A toast notification.
///
/// # Example
///
/// ```
/// use fadila_ui::toast::{Toast, ToastLevel};
///
/// let toast = Toast::success("Enseignant ajouté");
/// assert_eq!(toast.level, ToastLevel::Success);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Text to display.
    pub message: String,
    /// Severity.
    pub level: ToastLevel,
}

impl Toast {
    /// Create a toast with an explicit level.
    pub fn new(message: impl Into<String>, level: ToastLevel) -> Self {
        Self {
            message: message.into(),
            level,
        }
    }

    /// Create an info toast.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Info)
    }

    /// Create a success toast.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Success)
    }

    /// Create a warning toast.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Warning)
    }

    /// Create an error toast.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Error)
    }
}

impl From<String> for Toast {
    fn from(message: String) -> Self {
        Toast::info(message)
    }
}

impl From<&str> for Toast {
    fn from(message: &str) -> Self {
        Toast::info(message)
    }
}

/// Identifier handed out by [`ToastQueue::push`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

/// Lifecycle phase of a toast at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    /// Fully shown.
    Visible,
    /// Playing the exit animation.
    Exiting,
    /// Past its exit animation; removed on the next tick.
    Gone,
}

#[derive(Debug, Clone)]
struct ToastEntry {
    id: ToastId,
    toast: Toast,
    shown_at: Instant,
    closed_at: Option<Instant>,
}

/// Ordered stack of live toasts.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    entries: Vec<ToastEntry>,
    next_id: u64,
    display: Duration,
    exit: Duration,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastQueue {
    /// Create a queue with the standard timings.
    pub fn new() -> Self {
        Self::with_timings(DEFAULT_TOAST_DURATION, TOAST_EXIT_DURATION)
    }

    /// Create a queue with custom display and exit durations.
    pub fn with_timings(display: Duration, exit: Duration) -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
            display,
            exit,
        }
    }

    /// Show a toast starting at `now`.
    pub fn push(&mut self, toast: impl Into<Toast>, now: Instant) -> ToastId {
        let id = ToastId(self.next_id);
        self.next_id += 1;
        let toast = toast.into();
        log::debug!("[toast] show {:?}: {}", id, toast.message);
        self.entries.push(ToastEntry {
            id,
            toast,
            shown_at: now,
            closed_at: None,
        });
        id
    }

    /// Start the exit animation of a toast right away.
    ///
    /// Returns `false` when the toast is unknown or already leaving.
    pub fn close(&mut self, id: ToastId, now: Instant) -> bool {
        let (display, exit) = (self.display, self.exit);
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) if Self::phase_of(entry, now, display, exit) == ToastPhase::Visible => {
                entry.closed_at = Some(now);
                true
            }
            _ => false,
        }
    }

    /// Phase of a toast at `now`, or `None` if it is not in the queue.
    pub fn phase(&self, id: ToastId, now: Instant) -> Option<ToastPhase> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| Self::phase_of(e, now, self.display, self.exit))
    }

    /// Drop every toast whose exit animation has finished.
    ///
    /// Returns the removed IDs.
    pub fn tick(&mut self, now: Instant) -> Vec<ToastId> {
        let (display, exit) = (self.display, self.exit);
        let mut removed = Vec::new();
        self.entries.retain(|entry| {
            if Self::phase_of(entry, now, display, exit) == ToastPhase::Gone {
                removed.push(entry.id);
                false
            } else {
                true
            }
        });
        if !removed.is_empty() {
            log::debug!("[toast] expired {:?}", removed);
        }
        removed
    }

    /// Live toasts with their phase, oldest first.
    pub fn active(&self, now: Instant) -> Vec<(ToastId, &Toast, ToastPhase)> {
        self.entries
            .iter()
            .map(|e| (e.id, &e.toast, Self::phase_of(e, now, self.display, self.exit)))
            .filter(|(_, _, phase)| *phase != ToastPhase::Gone)
            .collect()
    }

    /// Earliest instant after `now` at which some toast changes phase.
    pub fn next_deadline(&self, now: Instant) -> Option<Instant> {
        self.entries
            .iter()
            .flat_map(|e| {
                let exit_start = Self::exit_start(e, self.display);
                [exit_start, exit_start + self.exit]
            })
            .filter(|deadline| *deadline > now)
            .min()
    }

    /// Number of toasts still held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the queue holds no toasts.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn exit_start(entry: &ToastEntry, display: Duration) -> Instant {
        let timed_out = entry.shown_at + display;
        entry.closed_at.map_or(timed_out, |closed| closed.min(timed_out))
    }

    fn phase_of(entry: &ToastEntry, now: Instant, display: Duration, exit: Duration) -> ToastPhase {
        let exit_start = Self::exit_start(entry, display);
        if now < exit_start {
            ToastPhase::Visible
        } else if now < exit_start + exit {
            ToastPhase::Exiting
        } else {
            ToastPhase::Gone
        }
    }
}
