//! Validation error types

/// A user-entered value was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Input is not a whole number.
    #[error("{field}: \"{input}\" is not a number")]
    NotANumber {
        /// Field being edited.
        field: String,
        /// Raw input.
        input: String,
    },

    /// Number outside the accepted range.
    #[error("{field}: {value} is outside {min}..={max}")]
    OutOfRange {
        field: String,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Target record does not exist.
    #[error("unknown {entity} #{id}")]
    UnknownRecord {
        entity: &'static str,
        id: u32,
    },
}

impl ValidationError {
    /// The field the error applies to, when there is one.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::NotANumber { field, .. } | Self::OutOfRange { field, .. } => Some(field),
            Self::UnknownRecord { .. } => None,
        }
    }
}
