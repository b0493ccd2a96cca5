//! What the table shows for its current state.

use super::column::Alignment;
use super::row::RowKey;
use super::sort::SortDirection;

/// Rendering state, exactly one at a time.
///
/// Chosen in priority order: loading, error, no visible columns, no rows
/// after filtering, populated grid.
#[derive(Debug, Clone, PartialEq)]
pub enum TableView {
    /// Data is being fetched.
    Loading,
    /// Fetch failed; show the message and a retry action.
    Error { message: String },
    /// Every column is hidden. `can_reset` offers the reset shortcut.
    NoVisibleColumns { can_reset: bool },
    /// Nothing matches (or there is no data). `total` counts unfiltered rows.
    Empty { total: usize },
    /// Populated grid.
    Rows(TableBody),
}

/// Header cell of a visible column.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    pub key: String,
    pub label: String,
    pub width: u32,
    pub align: Alignment,
    pub sortable: bool,
    /// Sort indicator, when this column is the sorted one.
    pub sort: Option<SortDirection>,
}

/// One rendered data row.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRow {
    /// Position in the displayed (filtered, sorted) sequence.
    pub index: usize,
    /// Position in the data as supplied.
    pub source_index: usize,
    pub key: Option<RowKey>,
    /// Cell text, one per visible column.
    pub cells: Vec<String>,
    pub selected: bool,
    /// Alternate shading on odd display rows.
    pub striped: bool,
}

/// Populated grid contents.
#[derive(Debug, Clone, PartialEq)]
pub struct TableBody {
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<RenderedRow>,
    /// Whether rows carry a selection checkbox.
    pub selectable: bool,
    /// State of the "select all" checkbox.
    pub all_selected: bool,
    /// Footer: rows shown after filtering.
    pub shown: usize,
    /// Footer: rows supplied.
    pub total: usize,
}
