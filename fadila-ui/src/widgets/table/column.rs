//! Column descriptors and column-list operations.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use crate::error::GridError;
use crate::value::Value;

use super::row::TableRow;

/// Width given to columns that don't set one.
pub const DEFAULT_COLUMN_WIDTH: u32 = 150;

/// Category used for pool columns that don't declare one.
pub const UNCATEGORIZED: &str = "other";

/// Horizontal alignment for column content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

type RenderFn = dyn Fn(&Value, &dyn TableRow, usize) -> String + Send + Sync;

/// Custom cell formatter: `(value, row, row_index) -> text`.
///
/// Renderers are shared between clones of a column, and two columns only
/// compare equal when they share the same renderer.
#[derive(Clone)]
pub struct CellRenderer(Arc<RenderFn>);

impl CellRenderer {
    /// Wrap a formatting function.
    pub fn new(f: impl Fn(&Value, &dyn TableRow, usize) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Format one cell.
    pub fn render(&self, value: &Value, row: &dyn TableRow, row_index: usize) -> String {
        (*self.0)(value, row, row_index)
    }
}

impl PartialEq for CellRenderer {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for CellRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CellRenderer(..)")
    }
}

/// Column configuration.
///
/// # Examples
///
/// ```
/// use fadila_ui::widgets::{Alignment, Column};
///
/// let columns = vec![
///     Column::new("name", "Nom"),
///     Column::new("hours", "Heures").width(90).align(Alignment::Right),
///     Column::new("actions", "").unsortable(),
/// ];
/// assert!(columns.iter().all(|c| c.visible));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Field name read from each row; unique within a column set.
    pub key: String,
    /// Header text.
    pub label: String,
    /// Whether the column currently renders.
    pub visible: bool,
    /// Width in pixels.
    pub width: u32,
    /// Whether header clicks sort by this column.
    pub sortable: bool,
    /// Optional formatter overriding the value's string form.
    pub render: Option<CellRenderer>,
    /// Grouping label for the "add column" picker.
    pub category: Option<String>,
    /// Horizontal alignment hint.
    pub align: Alignment,
}

impl Column {
    /// Create a visible, sortable column.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            visible: true,
            width: DEFAULT_COLUMN_WIDTH,
            sortable: true,
            render: None,
            category: None,
            align: Alignment::Left,
        }
    }

    /// Set the width.
    pub fn width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Start hidden.
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Opt out of sorting.
    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Set the picker category.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the alignment.
    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Set a custom cell renderer.
    pub fn render(
        mut self,
        f: impl Fn(&Value, &dyn TableRow, usize) -> String + Send + Sync + 'static,
    ) -> Self {
        self.render = Some(CellRenderer::new(f));
        self
    }

    /// Text for this column's cell in `row`.
    pub fn cell_text(&self, row: &dyn TableRow, row_index: usize) -> String {
        let value = row.field(&self.key);
        match &self.render {
            Some(renderer) => renderer.render(&value, row, row_index),
            None => value.to_string(),
        }
    }
}

/// Reject column lists that repeat a key.
pub(crate) fn ensure_unique(columns: &[Column]) -> Result<(), GridError> {
    let mut seen = HashSet::with_capacity(columns.len());
    for column in columns {
        if !seen.insert(column.key.as_str()) {
            return Err(GridError::DuplicateColumn(column.key.clone()));
        }
    }
    Ok(())
}

/// Position of a key in a column list.
pub(crate) fn position(columns: &[Column], key: &str) -> Option<usize> {
    columns.iter().position(|c| c.key == key)
}

/// Return a copy of `columns` with the item at `from` moved to `to`.
///
/// Remove-then-insert, so every other column keeps its relative order.
pub fn move_column(columns: &[Column], from: usize, to: usize) -> Result<Vec<Column>, GridError> {
    let len = columns.len();
    for index in [from, to] {
        if index >= len {
            return Err(GridError::OutOfRange { index, len });
        }
    }
    let mut moved = columns.to_vec();
    let column = moved.remove(from);
    moved.insert(to, column);
    Ok(moved)
}

/// Pool columns not yet in the active set, grouped for the picker.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnGroup {
    /// Category label.
    pub category: String,
    /// Columns in pool order.
    pub columns: Vec<Column>,
}

/// Group the pool entries missing from `active` by category.
///
/// Categories keep the order in which they first appear in the pool.
pub(crate) fn group_available(pool: &[Column], active: &[Column]) -> Vec<ColumnGroup> {
    let mut groups: Vec<ColumnGroup> = Vec::new();
    for column in pool.iter().filter(|c| position(active, &c.key).is_none()) {
        let category = column.category.as_deref().unwrap_or(UNCATEGORIZED);
        match groups.iter_mut().find(|g| g.category == category) {
            Some(group) => group.columns.push(column.clone()),
            None => groups.push(ColumnGroup {
                category: category.to_string(),
                columns: vec![column.clone()],
            }),
        }
    }
    groups
}

/// Serializable snapshot of a column arrangement.
///
/// The table never persists anything; a host that wants to remember a
/// user's layout captures one from the `on_columns_change` notification
/// and applies it when building the next table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColumnLayout {
    /// Active columns, in display order.
    pub columns: Vec<ColumnState>,
}

/// Persisted state of a single column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnState {
    pub key: String,
    pub visible: bool,
    pub width: u32,
}

impl ColumnLayout {
    /// Capture the arrangement of a column list.
    pub fn capture(columns: &[Column]) -> Self {
        Self {
            columns: columns
                .iter()
                .map(|c| ColumnState {
                    key: c.key.clone(),
                    visible: c.visible,
                    width: c.width,
                })
                .collect(),
        }
    }

    /// Rebuild a column list from this layout.
    ///
    /// Descriptors come from `defaults` first, then `pool`. Keys that match
    /// neither are dropped; default columns the layout doesn't mention are
    /// appended as declared.
    pub fn apply(&self, defaults: &[Column], pool: &[Column]) -> Vec<Column> {
        let mut columns: Vec<Column> = Vec::with_capacity(defaults.len());
        for state in &self.columns {
            if position(&columns, &state.key).is_some() {
                continue;
            }
            let descriptor = defaults
                .iter()
                .chain(pool)
                .find(|c| c.key == state.key);
            match descriptor {
                Some(descriptor) => columns.push(Column {
                    visible: state.visible,
                    width: state.width,
                    ..descriptor.clone()
                }),
                None => log::warn!("[layout] dropping unknown column {}", state.key),
            }
        }
        for column in defaults {
            if position(&columns, &column.key).is_none() {
                columns.push(column.clone());
            }
        }
        columns
    }
}
