//! Row selection tracked by key.

use std::collections::BTreeSet;

use super::table::RowKey;

/// Key-based multi-selection.
///
/// Keys rather than positions, so a selection stays attached to the same
/// rows while the view is filtered or re-sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: BTreeSet<RowKey>,
}

impl Selection {
    /// Create a new empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an existing set of keys.
    pub fn from_keys(keys: impl IntoIterator<Item = RowKey>) -> Self {
        Self {
            selected: keys.into_iter().collect(),
        }
    }

    /// All selected keys, sorted.
    pub fn keys(&self) -> Vec<RowKey> {
        self.selected.iter().cloned().collect()
    }

    /// Check if a key is selected.
    pub fn is_selected(&self, key: &RowKey) -> bool {
        self.selected.contains(key)
    }

    /// Get the number of selected rows.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Flip one key. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, key: &RowKey) -> bool {
        if self.selected.remove(key) {
            false
        } else {
            self.selected.insert(key.clone());
            true
        }
    }

    /// Whether every key in `keys` is selected (false for no keys).
    pub fn contains_all(&self, keys: &[RowKey]) -> bool {
        !keys.is_empty() && keys.iter().all(|k| self.selected.contains(k))
    }

    /// Select every key. Returns the newly selected ones.
    pub fn select_all(&mut self, keys: &[RowKey]) -> Vec<RowKey> {
        keys.iter()
            .filter(|k| self.selected.insert((*k).clone()))
            .cloned()
            .collect()
    }

    /// Deselect every key. Returns the ones that were selected.
    pub fn deselect_all(&mut self, keys: &[RowKey]) -> Vec<RowKey> {
        keys.iter()
            .filter(|k| self.selected.remove(*k))
            .cloned()
            .collect()
    }

    /// Clear all selection. Returns the keys that were deselected.
    pub fn clear(&mut self) -> Vec<RowKey> {
        std::mem::take(&mut self.selected).into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(ids: &[&str]) -> Vec<RowKey> {
        ids.iter().map(|id| RowKey::new(*id)).collect()
    }

    #[test]
    fn test_toggle() {
        let mut selection = Selection::new();
        let key = RowKey::new("4");
        assert!(selection.toggle(&key));
        assert!(selection.is_selected(&key));
        assert!(!selection.toggle(&key));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_select_all_reports_new_keys() {
        let mut selection = Selection::from_keys(keys(&["1"]));
        let added = selection.select_all(&keys(&["1", "2", "3"]));
        assert_eq!(added, keys(&["2", "3"]));
        assert!(selection.contains_all(&keys(&["1", "2", "3"])));
    }

    #[test]
    fn test_deselect_subset_keeps_others() {
        let mut selection = Selection::from_keys(keys(&["1", "2", "9"]));
        let removed = selection.deselect_all(&keys(&["1", "2"]));
        assert_eq!(removed, keys(&["1", "2"]));
        assert_eq!(selection.keys(), keys(&["9"]));
    }
}
