//! School records

mod meeting;
mod student;
mod teacher;
mod visitor;

pub use meeting::*;
pub use student::*;
pub use teacher::*;
pub use visitor::*;

use fadila_ui::Value;

pub(crate) fn full_name(first: &str, last: &str) -> Value {
    Value::String(format!("{first} {last}"))
}
