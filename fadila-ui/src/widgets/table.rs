//! DataTable widget - a searchable, sortable, column-configurable grid.
//!
//! The table reads caller-owned rows through [`TableRow`] and keeps only
//! view state: the search query, the sort column, the column arrangement
//! and the row selection. Column changes are reported through
//! `on_columns_change`; the table itself never persists anything.

mod column;
mod drag;
mod events;
mod pipeline;
mod resize;
mod row;
mod sort;
mod view;

use std::fmt;

use crate::error::GridError;

pub use column::{
    Alignment, CellRenderer, Column, ColumnGroup, ColumnLayout, ColumnState,
    DEFAULT_COLUMN_WIDTH, UNCATEGORIZED, move_column,
};
pub use drag::{
    AUTO_SCROLL_INTERVAL, AUTO_SCROLL_MAX_SPEED, AUTO_SCROLL_THRESHOLD, AutoScroll, ColumnDrag,
    PanelBounds,
};
pub use events::{EventResult, RetryAction};
pub use pipeline::{SearchFilter, contains_match};
pub use resize::{MIN_COLUMN_WIDTH, ResizeSession};
pub use row::{RowKey, TableRow};
pub use sort::{SortDirection, SortState};
pub use view::{HeaderCell, RenderedRow, TableBody, TableView};

use super::selection::Selection;
use column::{ensure_unique, group_available, position};
use events::Handlers;

// =============================================================================
// DataTableConfig
// =============================================================================

/// Everything a [`DataTable`] is built from.
///
/// # Example
///
/// ```
/// use fadila_ui::Record;
/// use fadila_ui::widgets::{Column, DataTableConfig};
///
/// let rows = vec![Record::new().set("id", 1).set("name", "Sara")];
/// let defaults = vec![Column::new("id", "#"), Column::new("name", "Nom")];
///
/// let table = DataTableConfig::new(rows)
///     .default_columns(defaults)
///     .extra_columns(vec![Column::new("phone", "Tél").category("contact")])
///     .selectable(true)
///     .build()
///     .unwrap();
///
/// assert_eq!(table.columns().len(), 2);
/// assert!(table.can_reset());
/// ```
pub struct DataTableConfig<T> {
    data: Vec<T>,
    columns: Option<Vec<Column>>,
    default_columns: Option<Vec<Column>>,
    extra_columns: Vec<Column>,
    loading: bool,
    error: Option<String>,
    search_filter: SearchFilter<T>,
    selectable: bool,
    selected_rows: Vec<RowKey>,
    handlers: Handlers<T>,
}

impl<T: TableRow> DataTableConfig<T> {
    /// Start a configuration over `data`.
    pub fn new(data: Vec<T>) -> Self {
        Self {
            data,
            columns: None,
            default_columns: None,
            extra_columns: Vec::new(),
            loading: false,
            error: None,
            search_filter: SearchFilter::default(),
            selectable: false,
            selected_rows: Vec::new(),
            handlers: Handlers::default(),
        }
    }

    /// Initial columns. Defaults to a copy of `default_columns`.
    pub fn columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = Some(columns);
        self
    }

    /// Snapshot restored by reset. Without it, reset is unavailable.
    pub fn default_columns(mut self, columns: Vec<Column>) -> Self {
        self.default_columns = Some(columns);
        self
    }

    /// Pool of columns offered in the "add column" picker.
    pub fn extra_columns(mut self, columns: Vec<Column>) -> Self {
        self.extra_columns = columns;
        self
    }

    /// Start in the loading state.
    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// Start in the error state.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }

    /// Replace the default search predicate.
    pub fn search_filter(mut self, filter: SearchFilter<T>) -> Self {
        self.search_filter = filter;
        self
    }

    /// Enable row selection.
    pub fn selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    /// Initially selected row keys.
    pub fn selected_rows(mut self, keys: impl IntoIterator<Item = RowKey>) -> Self {
        self.selected_rows = keys.into_iter().collect();
        self
    }

    /// Called with the full column list after every committed column change.
    pub fn on_columns_change(mut self, f: impl FnMut(&[Column]) + Send + 'static) -> Self {
        self.handlers.columns = Some(Box::new(f));
        self
    }

    /// Called with the full selected key set after every selection change.
    pub fn on_selected_rows_change(mut self, f: impl FnMut(&[RowKey]) + Send + 'static) -> Self {
        self.handlers.selection = Some(Box::new(f));
        self
    }

    /// Called with the row and its display index when a row is clicked.
    pub fn on_row_click(mut self, f: impl FnMut(&T, usize) + Send + 'static) -> Self {
        self.handlers.row_click = Some(Box::new(f));
        self
    }

    /// Called by the retry button of the error state.
    pub fn on_retry(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.handlers.retry = Some(Box::new(f));
        self
    }

    /// Validate and build the table.
    pub fn build(self) -> Result<DataTable<T>, GridError> {
        let columns = match (self.columns, &self.default_columns) {
            (Some(columns), _) => columns,
            (None, Some(defaults)) => defaults.clone(),
            (None, None) => Vec::new(),
        };
        ensure_unique(&columns)?;
        if let Some(defaults) = &self.default_columns {
            ensure_unique(defaults)?;
        }
        ensure_unique(&self.extra_columns)?;
        if self.selectable {
            ensure_keyed(&self.data)?;
        }

        let core_keys = self
            .default_columns
            .as_deref()
            .unwrap_or(columns.as_slice())
            .iter()
            .map(|c| c.key.clone())
            .collect();

        let mut table = DataTable {
            data: self.data,
            columns,
            defaults: self.default_columns,
            pool: self.extra_columns,
            core_keys,
            loading: false,
            error: None,
            query: String::new(),
            filter: self.search_filter,
            sort: SortState::new(),
            order: Vec::new(),
            selectable: self.selectable,
            selection: Selection::from_keys(self.selected_rows),
            drag: None,
            auto_scroll: AutoScroll::default(),
            resize: None,
            handlers: self.handlers,
        };
        table.set_loading(self.loading);
        if let Some(message) = self.error {
            table.set_error(Some(message));
        }
        table.refresh();
        Ok(table)
    }
}

/// Fail when a row can't be identified for selection.
fn ensure_keyed<T: TableRow>(data: &[T]) -> Result<(), GridError> {
    match data.iter().position(|row| row.key().is_none()) {
        Some(index) => Err(GridError::MissingRowKey { index }),
        None => Ok(()),
    }
}

// =============================================================================
// DataTable
// =============================================================================

/// Column-configurable grid engine over caller-owned rows.
pub struct DataTable<T> {
    data: Vec<T>,
    columns: Vec<Column>,
    defaults: Option<Vec<Column>>,
    pool: Vec<Column>,
    /// Keys that can only be hidden, never removed.
    core_keys: Vec<String>,
    loading: bool,
    error: Option<String>,
    query: String,
    filter: SearchFilter<T>,
    sort: SortState,
    /// Display order as indices into `data`; rebuilt when an input changes.
    order: Vec<usize>,
    selectable: bool,
    selection: Selection,
    drag: Option<ColumnDrag>,
    auto_scroll: AutoScroll,
    resize: Option<ResizeSession>,
    handlers: Handlers<T>,
}

impl<T> fmt::Debug for DataTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTable")
            .field("rows", &self.data.len())
            .field("columns", &self.columns)
            .field("query", &self.query)
            .field("sort", &self.sort)
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}

impl<T: TableRow> DataTable<T> {
    // -------------------------------------------------------------------------
    // Data and display state
    // -------------------------------------------------------------------------

    /// Rows as supplied.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Replace the rows. Selection is kept; it belongs to the caller.
    pub fn set_data(&mut self, data: Vec<T>) -> Result<(), GridError> {
        if self.selectable {
            ensure_keyed(&data)?;
        }
        self.data = data;
        self.refresh();
        Ok(())
    }

    /// Rows in display order (filtered, sorted).
    pub fn rows(&self) -> impl Iterator<Item = &T> {
        self.order.iter().map(|&i| &self.data[i])
    }

    /// Rows left after filtering.
    pub fn shown_count(&self) -> usize {
        self.order.len()
    }

    /// Rows supplied.
    pub fn total_count(&self) -> usize {
        self.data.len()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Enter or leave the loading state. Loading clears any error.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        if loading {
            self.error = None;
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Enter or leave the error state. An error ends loading.
    pub fn set_error(&mut self, error: Option<String>) {
        if error.is_some() {
            self.loading = false;
        }
        self.error = error;
    }

    /// Rebuild the display order from data, query, filter and sort.
    fn refresh(&mut self) {
        self.order = pipeline::run(&self.data, &self.query, &self.filter, &self.sort);
        log::trace!(
            "[table] view {} of {} rows (query {:?}, sort {:?})",
            self.order.len(),
            self.data.len(),
            self.query,
            self.sort
        );
    }

    // -------------------------------------------------------------------------
    // Search
    // -------------------------------------------------------------------------

    /// Current search query.
    pub fn search(&self) -> &str {
        &self.query
    }

    /// Set the search query.
    pub fn set_search(&mut self, query: impl Into<String>) -> EventResult {
        let query = query.into();
        if query == self.query {
            return EventResult::Ignored;
        }
        self.query = query;
        self.refresh();
        EventResult::Consumed
    }

    /// Replace the search predicate.
    pub fn set_search_filter(&mut self, filter: SearchFilter<T>) {
        self.filter = filter;
        self.refresh();
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Current sort state.
    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    /// Header click: advance the sort cycle for `key`.
    pub fn click_header(&mut self, key: &str) -> EventResult {
        let sortable = self
            .columns
            .iter()
            .find(|c| c.key == key)
            .is_some_and(|c| c.sortable);
        if !sortable {
            return EventResult::Ignored;
        }
        let direction = self.sort.click(key);
        log::debug!("[table] sort {} {:?}", key, direction);
        self.refresh();
        EventResult::Consumed
    }

    /// Header double-click: back to input order.
    pub fn double_click_header(&mut self, key: &str) -> EventResult {
        if position(&self.columns, key).is_none() || !self.sort.is_sorted() {
            return EventResult::Ignored;
        }
        self.sort.clear();
        log::debug!("[table] sort cleared");
        self.refresh();
        EventResult::Consumed
    }

    fn drop_stale_sort(&mut self) {
        if let Some(key) = self.sort.column()
            && position(&self.columns, key).is_none()
        {
            self.sort.clear();
            self.refresh();
        }
    }

    // -------------------------------------------------------------------------
    // Columns
    // -------------------------------------------------------------------------

    /// Active columns in order, including hidden ones. While a drag is in
    /// progress this is the drag preview.
    pub fn columns(&self) -> &[Column] {
        match &self.drag {
            Some(drag) => drag.preview(),
            None => &self.columns,
        }
    }

    /// Columns that render.
    pub fn visible_columns(&self) -> Vec<&Column> {
        self.columns().iter().filter(|c| c.visible).collect()
    }

    /// Default snapshot, if one was supplied.
    pub fn default_columns(&self) -> Option<&[Column]> {
        self.defaults.as_deref()
    }

    /// Replace the columns from outside (controlled update). Does not notify.
    pub fn set_columns(&mut self, columns: Vec<Column>) -> Result<(), GridError> {
        ensure_unique(&columns)?;
        self.drag = None;
        self.auto_scroll.stop();
        self.resize = None;
        self.columns = columns;
        self.drop_stale_sort();
        Ok(())
    }

    /// Flip a column's visibility. Returns the new flag.
    pub fn toggle_column(&mut self, key: &str) -> Result<bool, GridError> {
        self.abandon_drag();
        let column = self
            .columns
            .iter_mut()
            .find(|c| c.key == key)
            .ok_or_else(|| GridError::UnknownColumn(key.to_string()))?;
        column.visible = !column.visible;
        let visible = column.visible;
        log::debug!("[table] column {} visible={}", key, visible);
        self.notify_columns();
        Ok(visible)
    }

    /// Pool columns not in the active set, grouped by category.
    pub fn available_extra_columns(&self) -> Vec<ColumnGroup> {
        group_available(&self.pool, &self.columns)
    }

    /// Append a pool column, visible, at the end.
    pub fn add_extra_column(&mut self, key: &str) -> Result<(), GridError> {
        self.abandon_drag();
        if position(&self.columns, key).is_some() {
            return Err(GridError::DuplicateColumn(key.to_string()));
        }
        let mut column = self
            .pool
            .iter()
            .find(|c| c.key == key)
            .cloned()
            .ok_or_else(|| GridError::UnknownColumn(key.to_string()))?;
        column.visible = true;
        self.columns.push(column);
        log::debug!("[table] added column {}", key);
        self.notify_columns();
        Ok(())
    }

    /// Whether `key` came from the pool and may be deleted.
    pub fn is_removable(&self, key: &str) -> bool {
        self.pool.iter().any(|c| c.key == key) && !self.core_keys.iter().any(|k| k == key)
    }

    /// Delete a pool column from the active set.
    pub fn remove_column(&mut self, key: &str) -> Result<(), GridError> {
        self.abandon_drag();
        let index =
            position(&self.columns, key).ok_or_else(|| GridError::UnknownColumn(key.to_string()))?;
        if !self.is_removable(key) {
            log::warn!("[table] refusing to remove core column {}", key);
            return Err(GridError::ColumnNotRemovable(key.to_string()));
        }
        self.columns.remove(index);
        if self.resize.as_ref().is_some_and(|r| r.key() == key) {
            self.resize = None;
        }
        log::debug!("[table] removed column {}", key);
        self.drop_stale_sort();
        self.notify_columns();
        Ok(())
    }

    /// Whether a default snapshot exists.
    pub fn can_reset(&self) -> bool {
        self.defaults.is_some()
    }

    /// Restore a fresh copy of the default columns.
    pub fn reset_columns(&mut self) -> Result<(), GridError> {
        let defaults = self.defaults.clone().ok_or(GridError::ResetUnavailable)?;
        self.drag = None;
        self.auto_scroll.stop();
        self.resize = None;
        self.columns = defaults;
        log::debug!("[table] columns reset to defaults");
        self.drop_stale_sort();
        self.notify_columns();
        Ok(())
    }

    fn notify_columns(&mut self) {
        if let Some(handler) = self.handlers.columns.as_mut() {
            handler(&self.columns);
        }
    }

    // -------------------------------------------------------------------------
    // Drag reorder
    // -------------------------------------------------------------------------

    /// Start dragging a column in the column panel.
    ///
    /// A resize still in progress is released first, keeping its width.
    pub fn begin_column_drag(&mut self, key: &str) -> Result<(), GridError> {
        self.abandon_drag();
        if self.resize.is_some() {
            self.end_resize()?;
        }
        self.drag = Some(ColumnDrag::start(&self.columns, key)?);
        log::debug!("[table] drag start {}", key);
        Ok(())
    }

    /// Whether a column drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// The dragged column hovers over `target`; update the preview.
    pub fn drag_over(&mut self, target: usize) -> Result<EventResult, GridError> {
        let drag = self.drag.as_mut().ok_or(GridError::NoSession("column drag"))?;
        Ok(drag.hover(target)?.into())
    }

    /// Drop: commit the preview and notify once.
    pub fn end_column_drag(&mut self) -> Result<(), GridError> {
        let drag = self.drag.take().ok_or(GridError::NoSession("column drag"))?;
        self.auto_scroll.stop();
        log::debug!("[table] drag end {} at {}", drag.key(), drag.index());
        self.columns = drag.finish();
        self.notify_columns();
        Ok(())
    }

    /// Abort the drag, restoring the arrangement from before it.
    pub fn cancel_column_drag(&mut self) -> Result<(), GridError> {
        let drag = self.drag.take().ok_or(GridError::NoSession("column drag"))?;
        self.auto_scroll.stop();
        self.columns = drag.cancel();
        Ok(())
    }

    /// Other column edits end a drag without committing it.
    fn abandon_drag(&mut self) {
        if let Some(drag) = self.drag.take() {
            log::debug!("[table] drag of {} abandoned", drag.key());
            self.columns = drag.cancel();
            self.auto_scroll.stop();
        }
    }

    /// Pointer moved while dragging; updates edge auto-scroll.
    ///
    /// Returns whether the auto-scroll timer should be running.
    pub fn drag_pointer_moved(&mut self, pointer_y: i32, panel: PanelBounds) -> bool {
        if self.drag.is_none() {
            return false;
        }
        self.auto_scroll.update(pointer_y, panel);
        self.auto_scroll.is_active()
    }

    /// Pointer left the column list; stops auto-scroll.
    pub fn drag_pointer_left(&mut self) {
        self.auto_scroll.stop();
    }

    /// Auto-scroll state.
    pub fn auto_scroll(&self) -> &AutoScroll {
        &self.auto_scroll
    }

    /// One auto-scroll timer tick: the panel scroll delta in px.
    pub fn auto_scroll_tick(&self) -> i32 {
        self.auto_scroll.tick()
    }

    // -------------------------------------------------------------------------
    // Resize
    // -------------------------------------------------------------------------

    /// Pointer-down on a column's resize handle.
    pub fn begin_resize(&mut self, key: &str, pointer_x: i32) -> Result<(), GridError> {
        self.abandon_drag();
        let column = self
            .columns
            .iter()
            .find(|c| c.key == key)
            .ok_or_else(|| GridError::UnknownColumn(key.to_string()))?;
        self.resize = Some(ResizeSession::new(key, pointer_x, column.width));
        Ok(())
    }

    /// Whether a resize is in progress.
    pub fn is_resizing(&self) -> bool {
        self.resize.is_some()
    }

    /// Pointer moved anywhere during a resize. Returns the live width.
    pub fn resize_move(&mut self, pointer_x: i32) -> Result<u32, GridError> {
        let session = self.resize.as_ref().ok_or(GridError::NoSession("resize"))?;
        let width = session.width_at(pointer_x);
        if let Some(column) = self.columns.iter_mut().find(|c| c.key == session.key()) {
            column.width = width;
        }
        Ok(width)
    }

    /// Pointer released: commit the width and notify.
    pub fn end_resize(&mut self) -> Result<u32, GridError> {
        let session = self.resize.take().ok_or(GridError::NoSession("resize"))?;
        let width = self
            .columns
            .iter()
            .find(|c| c.key == session.key())
            .map(|c| c.width)
            .ok_or_else(|| GridError::UnknownColumn(session.key().to_string()))?;
        log::debug!("[table] column {} width {}", session.key(), width);
        self.notify_columns();
        Ok(width)
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    pub fn is_selectable(&self) -> bool {
        self.selectable
    }

    /// Selected keys, sorted.
    pub fn selected_rows(&self) -> Vec<RowKey> {
        self.selection.keys()
    }

    /// Rows whose key is selected, in data order.
    pub fn selected_items(&self) -> Vec<&T> {
        self.data
            .iter()
            .filter(|row| row.key().is_some_and(|k| self.selection.is_selected(&k)))
            .collect()
    }

    /// Replace the selection from outside (controlled update). Does not notify.
    pub fn set_selected_rows(&mut self, keys: impl IntoIterator<Item = RowKey>) {
        self.selection = Selection::from_keys(keys);
    }

    /// Flip one row. Returns whether it is selected afterwards.
    pub fn toggle_row(&mut self, key: &RowKey) -> Result<bool, GridError> {
        if !self.selectable {
            return Err(GridError::NotSelectable);
        }
        let selected = self.selection.toggle(key);
        self.notify_selection();
        Ok(selected)
    }

    /// "Select all" checkbox over the rows currently displayed.
    ///
    /// Deselects them when all are already selected, selects them
    /// otherwise. Rows filtered out keep their state. Returns whether the
    /// displayed rows end up all selected.
    pub fn toggle_select_all(&mut self) -> Result<bool, GridError> {
        if !self.selectable {
            return Err(GridError::NotSelectable);
        }
        let keys = self.displayed_keys()?;
        if self.selection.contains_all(&keys) {
            self.selection.deselect_all(&keys);
        } else {
            self.selection.select_all(&keys);
        }
        self.notify_selection();
        Ok(self.selection.contains_all(&keys))
    }

    /// Whether every displayed row is selected (false when none are shown).
    pub fn is_all_selected(&self) -> bool {
        self.displayed_keys()
            .map(|keys| self.selection.contains_all(&keys))
            .unwrap_or(false)
    }

    fn displayed_keys(&self) -> Result<Vec<RowKey>, GridError> {
        self.order
            .iter()
            .map(|&i| {
                self.data[i]
                    .key()
                    .ok_or(GridError::MissingRowKey { index: i })
            })
            .collect()
    }

    fn notify_selection(&mut self) {
        let keys = self.selection.keys();
        log::debug!("[table] {} rows selected", keys.len());
        if let Some(handler) = self.handlers.selection.as_mut() {
            handler(&keys);
        }
    }

    // -------------------------------------------------------------------------
    // Row and retry events
    // -------------------------------------------------------------------------

    /// Click on the row at display index `index`.
    pub fn click_row(&mut self, index: usize) -> EventResult {
        let Some(&source) = self.order.get(index) else {
            return EventResult::Ignored;
        };
        match self.handlers.row_click.as_mut() {
            Some(handler) => {
                handler(&self.data[source], index);
                EventResult::Consumed
            }
            None => EventResult::Ignored,
        }
    }

    /// The retry button of the error state.
    pub fn retry(&mut self) -> RetryAction {
        match self.handlers.retry.as_mut() {
            Some(handler) => {
                handler();
                RetryAction::Handled
            }
            None => RetryAction::Reload,
        }
    }

    // -------------------------------------------------------------------------
    // View
    // -------------------------------------------------------------------------

    /// What to show right now.
    pub fn view(&self) -> TableView {
        if self.loading {
            return TableView::Loading;
        }
        if let Some(message) = &self.error {
            return TableView::Error {
                message: message.clone(),
            };
        }
        let columns = self.visible_columns();
        if columns.is_empty() {
            return TableView::NoVisibleColumns {
                can_reset: self.can_reset(),
            };
        }
        if self.order.is_empty() {
            return TableView::Empty {
                total: self.data.len(),
            };
        }

        let headers = columns
            .iter()
            .map(|c| HeaderCell {
                key: c.key.clone(),
                label: c.label.clone(),
                width: c.width,
                align: c.align,
                sortable: c.sortable,
                sort: self.sort.direction_for(&c.key),
            })
            .collect();

        let rows = self
            .order
            .iter()
            .enumerate()
            .map(|(index, &source)| {
                let row = &self.data[source];
                let key = row.key();
                RenderedRow {
                    index,
                    source_index: source,
                    cells: columns.iter().map(|c| c.cell_text(row, index)).collect(),
                    selected: key.as_ref().is_some_and(|k| self.selection.is_selected(k)),
                    striped: index % 2 == 1,
                    key,
                }
            })
            .collect();

        TableView::Rows(TableBody {
            headers,
            rows,
            selectable: self.selectable,
            all_selected: self.selectable && self.is_all_selected(),
            shown: self.order.len(),
            total: self.data.len(),
        })
    }
}
