//! Column width dragging.

/// Narrowest width a resize can produce.
pub const MIN_COLUMN_WIDTH: u32 = 50;

/// A resize gesture in progress.
///
/// Captured on pointer-down over a column's handle and fed every pointer
/// move until release, wherever the pointer is. The layout is right-to-left:
/// moving the pointer left widens the column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeSession {
    key: String,
    start_x: i32,
    start_width: u32,
}

impl ResizeSession {
    pub fn new(key: impl Into<String>, start_x: i32, start_width: u32) -> Self {
        Self {
            key: key.into(),
            start_x,
            start_width,
        }
    }

    /// Key of the column being resized.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Width for the pointer at `pointer_x`.
    pub fn width_at(&self, pointer_x: i32) -> u32 {
        let delta = i64::from(self.start_x) - i64::from(pointer_x);
        let width = (i64::from(self.start_width) + delta).max(i64::from(MIN_COLUMN_WIDTH));
        u32::try_from(width).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_widens_right_narrows() {
        let session = ResizeSession::new("name", 400, 120);
        assert_eq!(session.width_at(370), 150);
        assert_eq!(session.width_at(430), 90);
    }

    #[test]
    fn test_clamped_to_minimum() {
        let session = ResizeSession::new("name", 400, 120);
        assert_eq!(session.width_at(1_000), MIN_COLUMN_WIDTH);
    }
}
