//! Error types

/// Errors raised by table operations that the caller asked for but that
/// cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// No column with this key is in the active set (or pool).
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    /// A column with this key already exists.
    #[error("duplicate column key: {0}")]
    DuplicateColumn(String),

    /// Core columns can only be hidden.
    #[error("column {0} is not removable")]
    ColumnNotRemovable(String),

    /// No default snapshot was supplied.
    #[error("no default columns to reset to")]
    ResetUnavailable,

    /// Selection needs a stable row key.
    #[error("row at index {index} has no key")]
    MissingRowKey {
        /// Index of the row in the supplied data.
        index: usize,
    },

    /// The table was not configured for selection.
    #[error("table is not selectable")]
    NotSelectable,

    /// A drag or resize operation was issued with no session in progress.
    #[error("no {0} in progress")]
    NoSession(&'static str),

    /// Index outside of the column list.
    #[error("index {index} out of range (len {len})")]
    OutOfRange {
        /// Requested index.
        index: usize,
        /// Length of the list.
        len: usize,
    },
}
