//! Event results and outward notifications.

use super::column::Column;
use super::row::RowKey;

/// Whether an input event changed anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// The event was handled.
    Consumed,
    /// The event did not apply (unknown target, unsortable column, ...).
    Ignored,
}

impl EventResult {
    pub fn is_consumed(self) -> bool {
        self == Self::Consumed
    }
}

impl From<bool> for EventResult {
    fn from(consumed: bool) -> Self {
        if consumed { Self::Consumed } else { Self::Ignored }
    }
}

/// Outcome of the retry button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryAction {
    /// A registered `on_retry` handler ran.
    Handled,
    /// No handler; the host should reload the page.
    Reload,
}

pub(crate) type ColumnsHandler = Box<dyn FnMut(&[Column]) + Send>;
pub(crate) type SelectionHandler = Box<dyn FnMut(&[RowKey]) + Send>;
pub(crate) type RowClickHandler<T> = Box<dyn FnMut(&T, usize) + Send>;
pub(crate) type RetryHandler = Box<dyn FnMut() + Send>;

/// Callbacks registered on a table.
pub(crate) struct Handlers<T> {
    pub columns: Option<ColumnsHandler>,
    pub selection: Option<SelectionHandler>,
    pub row_click: Option<RowClickHandler<T>>,
    pub retry: Option<RetryHandler>,
}

impl<T> Default for Handlers<T> {
    fn default() -> Self {
        Self {
            columns: None,
            selection: None,
            row_click: None,
            retry: None,
        }
    }
}
