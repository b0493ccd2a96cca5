//! Command-line interface.
//!
//! ```bash
//! # French teachers table (defaults)
//! fadila
//!
//! # Students in Arabic, organization view against a local API
//! fadila --lang ar --page students --api http://localhost:3000
//! ```

use std::path::PathBuf;

use clap::Parser;
use clap::ValueEnum;
use fadila_lib::Language;
use fadila_lib::Text;
use serde::Deserialize;
use serde::Serialize;

/// EL FADILA SCHOOL dashboard tables in the terminal.
#[derive(Parser, Debug, Clone)]
#[command(name = "fadila", version, about)]
pub struct Cli {
    /// Interface language: fr, ar or en
    #[arg(long, env = "FADILA_LANG")]
    pub lang: Option<Language>,

    /// Table to open
    #[arg(long, value_enum)]
    pub page: Option<Page>,

    /// Base URL of the school API
    #[arg(long, env = "FADILA_API")]
    pub api: Option<String>,

    /// Path to the JSON config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the effective settings back to the config file
    #[arg(long)]
    pub save_config: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// More logging (-v debug, -vv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Dashboard page backed by a DataTable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    Teachers,
    Students,
}

impl Page {
    pub fn slug(self) -> &'static str {
        match self {
            Self::Teachers => "teachers",
            Self::Students => "students",
        }
    }

    pub fn title(self, lang: Language) -> &'static str {
        lang.text(match self {
            Self::Teachers => Text::Teachers,
            Self::Students => Text::Students,
        })
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_rejects_unknown_language() {
        assert!(Cli::try_parse_from(["fadila", "--lang", "de"]).is_err());
    }

    #[test]
    fn test_parse_all_flags() {
        let cli = Cli::parse_from([
            "fadila",
            "--lang",
            "ar",
            "--page",
            "students",
            "--api",
            "http://localhost:3000",
            "--config",
            "/tmp/fadila.json",
        ]);
        assert_eq!(cli.lang, Some(Language::Ar));
        assert_eq!(cli.page, Some(Page::Students));
        assert_eq!(cli.api.as_deref(), Some("http://localhost:3000"));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/fadila.json")));
    }
}
