//! Saved column layouts, one JSON file per page.

use std::fs;
use std::io;
use std::path::PathBuf;

use fadila_ui::widgets::Column;
use fadila_ui::widgets::ColumnLayout;

use crate::cli::Page;
use crate::config::ConfigError;
use crate::config::write_file;
use crate::paths;

#[derive(Debug, Clone)]
pub struct LayoutStore {
    dir: PathBuf,
}

impl LayoutStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn load(&self, page: Page) -> Result<Option<ColumnLayout>, ConfigError> {
        let path = paths::layout_file(&self.dir, page);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(ConfigError::Read { path, source }),
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| ConfigError::Parse { path, source })
    }

    pub fn save(&self, page: Page, columns: &[Column]) -> Result<(), ConfigError> {
        let path = paths::layout_file(&self.dir, page);
        let json = serde_json::to_string_pretty(&ColumnLayout::capture(columns))?;
        write_file(&path, &json)?;
        log::debug!("saved {} layout to {}", page.slug(), path.display());
        Ok(())
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = LayoutStore::new(dir.path());
        assert_eq!(store.load(Page::Teachers).unwrap(), None);

        let columns = vec![Column::new("name", "Nom").width(220), Column::new("id", "N°").hidden()];
        store.save(Page::Teachers, &columns).unwrap();

        let layout = store.load(Page::Teachers).unwrap().unwrap();
        assert_eq!(layout, ColumnLayout::capture(&columns));
        assert_eq!(store.load(Page::Students).unwrap(), None);
    }

    #[test]
    fn test_corrupt_layout_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("students.json"), "[").unwrap();
        let store = LayoutStore::new(dir.path());
        assert!(matches!(store.load(Page::Students), Err(ConfigError::Parse { .. })));
    }
}
