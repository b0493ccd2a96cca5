//! Error types

mod api;
mod schedule;
mod validation;

pub use api::*;
pub use schedule::*;
pub use validation::*;
