//! Dashboard widgets.

mod selection;
mod simple_table;
mod table;

pub use selection::Selection;
pub use simple_table::{SimpleColumn, SimpleTable, SimpleView};
pub use table::*;
