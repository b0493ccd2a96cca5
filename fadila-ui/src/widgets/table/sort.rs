//! Header-click sort state machine.

/// Sort direction for the active column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// The other direction.
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Which column the view is sorted by, if any.
///
/// Clicking a header walks `unsorted → asc → desc → asc → …` for that
/// column; clicking another column starts over at ascending on it. Clearing
/// returns to the order the data was supplied in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortState {
    active: Option<(String, SortDirection)>,
}

impl SortState {
    /// Unsorted state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sorted by `key` in `direction`.
    pub fn by(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            active: Some((key.into(), direction)),
        }
    }

    /// Advance the state machine for a header click on `key`.
    pub fn click(&mut self, key: &str) -> SortDirection {
        let direction = match &self.active {
            Some((current, direction)) if current == key => direction.flipped(),
            _ => SortDirection::Ascending,
        };
        self.active = Some((key.to_string(), direction));
        direction
    }

    /// Back to input order.
    pub fn clear(&mut self) {
        self.active = None;
    }

    /// Column key being sorted by.
    pub fn column(&self) -> Option<&str> {
        self.active.as_ref().map(|(key, _)| key.as_str())
    }

    /// Active direction, if sorted.
    pub fn direction(&self) -> Option<SortDirection> {
        self.active.as_ref().map(|(_, direction)| *direction)
    }

    /// Direction for a specific column, `None` when another (or no) column
    /// is sorted.
    pub fn direction_for(&self, key: &str) -> Option<SortDirection> {
        match &self.active {
            Some((current, direction)) if current == key => Some(*direction),
            _ => None,
        }
    }

    /// Whether any column is sorted.
    pub fn is_sorted(&self) -> bool {
        self.active.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_cycle() {
        let mut sort = SortState::new();
        assert_eq!(sort.click("name"), SortDirection::Ascending);
        assert_eq!(sort.click("name"), SortDirection::Descending);
        assert_eq!(sort.click("name"), SortDirection::Ascending);
    }

    #[test]
    fn test_other_column_restarts_ascending() {
        let mut sort = SortState::by("name", SortDirection::Descending);
        assert_eq!(sort.click("hours"), SortDirection::Ascending);
        assert_eq!(sort.direction_for("name"), None);
        assert_eq!(sort.column(), Some("hours"));
    }
}
