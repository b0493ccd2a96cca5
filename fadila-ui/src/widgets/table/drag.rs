//! Column drag-and-drop reordering and edge auto-scroll.

use std::time::Duration;

use crate::error::GridError;

use super::column::{Column, move_column, position};

/// Distance from a panel edge (px) inside which auto-scroll kicks in.
pub const AUTO_SCROLL_THRESHOLD: i32 = 40;

/// Scroll step (px per tick) right at the edge.
pub const AUTO_SCROLL_MAX_SPEED: i32 = 12;

/// Period of the auto-scroll timer.
pub const AUTO_SCROLL_INTERVAL: Duration = Duration::from_millis(16);

/// A column drag in progress.
///
/// Holds the arrangement from before the drag and a preview that every
/// hover rebuilds with a fresh move. Nothing outside sees the preview
/// until the drag is finished.
#[derive(Debug, Clone)]
pub struct ColumnDrag {
    key: String,
    snapshot: Vec<Column>,
    preview: Vec<Column>,
    index: usize,
}

impl ColumnDrag {
    /// Start dragging `key` within `columns`.
    pub fn start(columns: &[Column], key: &str) -> Result<Self, GridError> {
        let index =
            position(columns, key).ok_or_else(|| GridError::UnknownColumn(key.to_string()))?;
        Ok(Self {
            key: key.to_string(),
            snapshot: columns.to_vec(),
            preview: columns.to_vec(),
            index,
        })
    }

    /// Key of the dragged column.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current index of the dragged column in the preview.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Arrangement as the user currently sees it.
    pub fn preview(&self) -> &[Column] {
        &self.preview
    }

    /// Move the dragged column to `target`. Returns whether the preview changed.
    pub fn hover(&mut self, target: usize) -> Result<bool, GridError> {
        if target == self.index {
            return Ok(false);
        }
        self.preview = move_column(&self.preview, self.index, target)?;
        self.index = target;
        Ok(true)
    }

    /// Whether the preview differs from the starting arrangement.
    pub fn is_moved(&self) -> bool {
        self.preview != self.snapshot
    }

    /// Commit the preview.
    pub fn finish(self) -> Vec<Column> {
        self.preview
    }

    /// Abandon the drag, yielding the starting arrangement.
    pub fn cancel(self) -> Vec<Column> {
        self.snapshot
    }
}

/// Vertical extent of the scrollable column-list panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelBounds {
    pub top: i32,
    pub bottom: i32,
}

impl PanelBounds {
    pub fn new(top: i32, bottom: i32) -> Self {
        Self { top, bottom }
    }
}

/// Edge auto-scroll while dragging a column.
///
/// The host runs a repeating timer at [`AUTO_SCROLL_INTERVAL`] while
/// [`AutoScroll::is_active`] and applies [`AutoScroll::tick`] to the panel's
/// scroll offset. Negative steps scroll up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AutoScroll {
    step: Option<i32>,
}

impl AutoScroll {
    /// Recompute the step from the pointer position.
    pub fn update(&mut self, pointer_y: i32, panel: PanelBounds) {
        let from_top = (pointer_y - panel.top).max(0);
        let from_bottom = (panel.bottom - pointer_y).max(0);
        self.step = if from_top < AUTO_SCROLL_THRESHOLD {
            Some(-Self::speed(from_top))
        } else if from_bottom < AUTO_SCROLL_THRESHOLD {
            Some(Self::speed(from_bottom))
        } else {
            None
        };
    }

    /// Stop the timer.
    pub fn stop(&mut self) {
        self.step = None;
    }

    /// Whether the timer should be running.
    pub fn is_active(&self) -> bool {
        self.step.is_some()
    }

    /// Scroll delta for one timer tick (0 when inactive).
    pub fn tick(&self) -> i32 {
        self.step.unwrap_or(0)
    }

    /// Faster the closer the pointer is to the edge, never below 1 px.
    fn speed(distance: i32) -> i32 {
        let remaining = AUTO_SCROLL_THRESHOLD - distance.min(AUTO_SCROLL_THRESHOLD);
        (AUTO_SCROLL_MAX_SPEED * remaining / AUTO_SCROLL_THRESHOLD).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel() -> PanelBounds {
        PanelBounds::new(100, 500)
    }

    #[test]
    fn test_middle_does_not_scroll() {
        let mut scroll = AutoScroll::default();
        scroll.update(300, panel());
        assert!(!scroll.is_active());
        assert_eq!(scroll.tick(), 0);
    }

    #[test]
    fn test_speed_grows_towards_edge() {
        let mut scroll = AutoScroll::default();
        scroll.update(130, panel());
        let far = scroll.tick();
        scroll.update(101, panel());
        let near = scroll.tick();
        assert!(far < 0 && near < 0);
        assert!(near.abs() > far.abs());

        scroll.update(499, panel());
        assert!(scroll.tick() > 0);
    }

    #[test]
    fn test_stop_clears_timer() {
        let mut scroll = AutoScroll::default();
        scroll.update(100, panel());
        assert_eq!(scroll.tick(), -AUTO_SCROLL_MAX_SPEED);
        scroll.stop();
        assert!(!scroll.is_active());
    }

    #[test]
    fn test_drag_preview_and_cancel() {
        let columns = vec![Column::new("a", "A"), Column::new("b", "B"), Column::new("c", "C")];
        let mut drag = ColumnDrag::start(&columns, "a").unwrap();
        assert!(drag.hover(1).unwrap());
        assert!(drag.hover(2).unwrap());
        assert!(!drag.hover(2).unwrap());
        let keys: Vec<_> = drag.preview().iter().map(|c| c.key.clone()).collect();
        assert_eq!(keys, ["b", "c", "a"]);
        assert_eq!(drag.cancel(), columns);
    }
}
