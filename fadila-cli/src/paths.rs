//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use directories::ProjectDirs;

use crate::cli::Page;

const QUALIFIER: &str = "dz";
const ORGANIZATION: &str = "elfadila";
const APPLICATION: &str = "fadila";

/// Get project directories, or None if home directory cannot be determined.
fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Persistent application data (column layouts).
///
/// - Linux: `$XDG_DATA_HOME/fadila` or `~/.local/share/fadila`
/// - macOS: `~/Library/Application Support/dz.elfadila.fadila`
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

/// Regenerable data (logs).
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Default location of `config.json`.
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.json"))
}

/// Directory holding one saved column layout per page.
pub fn layouts_dir() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("layouts"))
}

/// Saved layout file for a page inside `dir`.
pub fn layout_file(dir: &Path, page: Page) -> PathBuf {
    dir.join(format!("{}.json", page.slug()))
}

const LATEST_LOG: &str = "latest.log";
const ARCHIVE_PREFIX: &str = "session-";

/// Archived sessions kept next to `latest.log`.
const KEPT_SESSIONS: usize = 10;

/// Get the path to the latest log file.
pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(LATEST_LOG))
}

/// Archive the previous session's log and prune old archives.
///
/// Runs before the logger starts, so failures are silently skipped.
pub fn rotate_logs() {
    if let Some(cache) = cache_dir() {
        archive_latest(&cache, &chrono::Local::now().format("%Y%m%d-%H%M%S").to_string());
        prune_archives(&cache, KEPT_SESSIONS);
    }
}

/// Moves `latest.log` to `session-<stamp>.log`, returning the new path.
fn archive_latest(dir: &Path, stamp: &str) -> Option<PathBuf> {
    let target = dir.join(format!("{ARCHIVE_PREFIX}{stamp}.log"));
    fs::rename(dir.join(LATEST_LOG), &target).ok()?;
    Some(target)
}

/// Stamps sort chronologically, so the newest archives are the last names.
fn prune_archives(dir: &Path, keep: usize) {
    let Ok(entries) = fs::read_dir(dir) else { return };
    let mut archives: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(ARCHIVE_PREFIX) && name.ends_with(".log"))
        })
        .collect();
    archives.sort();

    let excess = archives.len().saturating_sub(keep);
    for stale in &archives[..excess] {
        let _ = fs::remove_file(stale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_archive_latest() {
        let dir = tempfile::tempdir().unwrap();
        assert!(archive_latest(dir.path(), "20260101-080000").is_none());

        fs::write(dir.path().join(LATEST_LOG), "boot").unwrap();
        let archived = archive_latest(dir.path(), "20260101-080000").unwrap();
        assert_eq!(fs::read_to_string(archived).unwrap(), "boot");
        assert_eq!(names(dir.path()), vec!["session-20260101-080000.log"]);
    }

    #[test]
    fn test_prune_keeps_newest_sessions() {
        let dir = tempfile::tempdir().unwrap();
        for day in 1..=5 {
            fs::write(dir.path().join(format!("session-202601{day:02}-080000.log")), "").unwrap();
        }
        fs::write(dir.path().join(LATEST_LOG), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        prune_archives(dir.path(), 2);
        assert_eq!(
            names(dir.path()),
            vec![
                "latest.log",
                "notes.txt",
                "session-20260104-080000.log",
                "session-20260105-080000.log",
            ]
        );
    }
}
