//! SimpleTable widget - a static grid with no configuration.
//!
//! Header, accessor and optional renderer per column; nothing to sort,
//! search or rearrange. Unrelated to [`DataTable`](super::DataTable).

use std::fmt;
use std::sync::Arc;

use crate::value::Value;

use super::table::{Alignment, TableRow};

/// Message shown when there are no rows.
pub const DEFAULT_EMPTY_MESSAGE: &str = "Aucune donnée";

type SimpleRenderFn<T> = dyn Fn(&Value, &T) -> String + Send + Sync;

/// Column of a [`SimpleTable`].
pub struct SimpleColumn<T> {
    /// Header text.
    pub header: String,
    /// Field read from each row.
    pub accessor: String,
    /// Optional formatter.
    pub render: Option<Arc<SimpleRenderFn<T>>>,
    pub align: Alignment,
}

impl<T> SimpleColumn<T> {
    pub fn new(header: impl Into<String>, accessor: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            accessor: accessor.into(),
            render: None,
            align: Alignment::Left,
        }
    }

    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    pub fn render(mut self, f: impl Fn(&Value, &T) -> String + Send + Sync + 'static) -> Self {
        self.render = Some(Arc::new(f));
        self
    }
}

impl<T> Clone for SimpleColumn<T> {
    fn clone(&self) -> Self {
        Self {
            header: self.header.clone(),
            accessor: self.accessor.clone(),
            render: self.render.clone(),
            align: self.align,
        }
    }
}

impl<T> fmt::Debug for SimpleColumn<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleColumn")
            .field("header", &self.header)
            .field("accessor", &self.accessor)
            .field("align", &self.align)
            .finish_non_exhaustive()
    }
}

/// Rendered contents of a [`SimpleTable`].
#[derive(Debug, Clone, PartialEq)]
pub enum SimpleView {
    /// One line per row, one cell per column.
    Rows {
        headers: Vec<(String, Alignment)>,
        rows: Vec<Vec<String>>,
    },
    /// A single placeholder row spanning every column.
    Empty {
        headers: Vec<(String, Alignment)>,
        message: String,
    },
}

/// Static table renderer.
///
/// # Example
///
/// ```
/// use fadila_ui::Record;
/// use fadila_ui::widgets::{SimpleColumn, SimpleTable, SimpleView};
///
/// let table = SimpleTable::new(vec![SimpleColumn::<Record>::new("Classe", "class")], vec![]);
/// assert!(matches!(table.view(), SimpleView::Empty { .. }));
/// ```
#[derive(Debug, Clone)]
pub struct SimpleTable<T> {
    columns: Vec<SimpleColumn<T>>,
    data: Vec<T>,
    empty_message: String,
}

impl<T: TableRow> SimpleTable<T> {
    pub fn new(columns: Vec<SimpleColumn<T>>, data: Vec<T>) -> Self {
        Self {
            columns,
            data,
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
        }
    }

    /// Override the empty-state text.
    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    pub fn columns(&self) -> &[SimpleColumn<T>] {
        &self.columns
    }

    /// Cell text for every row.
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.data
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .map(|column| {
                        let value = row.field(&column.accessor);
                        match &column.render {
                            Some(render) => (**render)(&value, row),
                            None => value.to_string(),
                        }
                    })
                    .collect()
            })
            .collect()
    }

    pub fn view(&self) -> SimpleView {
        let headers = self
            .columns
            .iter()
            .map(|c| (c.header.clone(), c.align))
            .collect();
        if self.data.is_empty() {
            SimpleView::Empty {
                headers,
                message: self.empty_message.clone(),
            }
        } else {
            SimpleView::Rows {
                headers,
                rows: self.rows(),
            }
        }
    }
}
