//! JSON configuration file.

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use fadila_lib::Language;
use serde::Deserialize;
use serde::Serialize;
use simplelog::LevelFilter;
use thiserror::Error;

use crate::cli::Cli;
use crate::cli::Page;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("cannot write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("invalid JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// User preferences, all optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct CliConfig {
    pub language: Language,
    pub page: Page,
    /// Base URL of the school API; the organization view is disabled without it.
    pub api_base: Option<String>,
    pub fetch_timeout_secs: u64,
    /// Write column layouts back to the data dir on every change.
    pub persist_layouts: bool,
    /// `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: String,
    pub color: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            language: Language::Fr,
            page: Page::Teachers,
            api_base: None,
            fetch_timeout_secs: 10,
            persist_layouts: true,
            log_level: "info".to_string(),
            color: true,
        }
    }
}

impl CliConfig {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("no config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        write_file(path, &json)
    }

    /// Command-line flags win over the file.
    pub fn merge_cli(mut self, cli: &Cli) -> Self {
        if let Some(lang) = cli.lang {
            self.language = lang;
        }
        if let Some(page) = cli.page {
            self.page = page;
        }
        if let Some(api) = &cli.api {
            self.api_base = Some(api.clone());
        }
        if cli.no_color {
            self.color = false;
        }
        if cli.verbose > 0 {
            self.log_level = match cli.verbose {
                1 => "debug",
                _ => "trace",
            }
            .to_string();
        }
        self
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs.max(1))
    }

    /// Parsed log level, `Info` when unrecognized.
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}

/// Write a file, creating parent directories.
pub(crate) fn write_file(path: &Path, contents: &str) -> Result<(), ConfigError> {
    let to_err = |source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(to_err)?;
    }
    fs::write(path, contents).map_err(to_err)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CliConfig::load(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"language":"ar","page":"students"}"#).unwrap();
        let config = CliConfig::load(&path).unwrap();
        assert_eq!(config.language, Language::Ar);
        assert_eq!(config.page, Page::Students);
        assert_eq!(config.fetch_timeout_secs, 10);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = CliConfig {
            api_base: Some("http://localhost:3000".into()),
            ..CliConfig::default()
        };
        config.save(&path).unwrap();
        assert_eq!(CliConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{").unwrap();
        assert!(matches!(CliConfig::load(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_flags_override_file() {
        let cli = Cli::parse_from(["fadila", "--lang", "en", "--page", "students", "-v"]);
        let config = CliConfig::default().merge_cli(&cli);
        assert_eq!(config.language, Language::En);
        assert_eq!(config.page, Page::Students);
        assert_eq!(config.level_filter(), LevelFilter::Debug);
    }
}
