//! Headless dashboard components.
//!
//! State machines for the EL FADILA SCHOOL dashboard widgets: the
//! column-configurable [`DataTable`](widgets::DataTable), the static
//! [`SimpleTable`](widgets::SimpleTable), toast notifications and the
//! dynamic row model they operate on. Nothing here draws; a front end feeds
//! events in and reads views back out.

pub mod error;
pub mod record;
pub mod state;
pub mod toast;
pub mod value;
pub mod widgets;

pub use error::GridError;
pub use record::Record;
pub use state::State;
pub use value::Value;

pub mod prelude {
    pub use crate::error::GridError;
    pub use crate::record::Record;
    pub use crate::state::State;
    pub use crate::toast::{Toast, ToastId, ToastLevel, ToastPhase, ToastQueue};
    pub use crate::value::Value;
    pub use crate::widgets::{
        Alignment, CellRenderer, Column, ColumnLayout, DataTable, DataTableConfig, EventResult,
        RetryAction, RowKey, SearchFilter, Selection, SimpleColumn, SimpleTable, SortDirection,
        SortState, TableRow, TableView,
    };
}
