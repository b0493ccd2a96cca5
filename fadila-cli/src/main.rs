mod cli;
mod command;
mod config;
mod context;
mod error;
mod layout;
mod paths;
mod render;
mod session;

use std::fs;
use std::fs::File;
use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::WriteLogger;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;

use crate::cli::Cli;
use crate::command::Command;
use crate::config::CliConfig;
use crate::context::AppContext;
use crate::error::CliError;
use crate::layout::LayoutStore;
use crate::session::Flow;
use crate::session::Session;

fn init_logging(level: LevelFilter) -> Result<(), CliError> {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else {
        return Ok(());
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    WriteLogger::init(level, Config::default(), File::create(&path)?)?;
    log::info!("logging to {}", path.display());
    Ok(())
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = cli.config.clone().or_else(paths::config_file);
    let config = match &config_path {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    }
    .merge_cli(&cli);

    init_logging(config.level_filter())?;
    if cli.save_config
        && let Some(path) = &config_path
    {
        config.save(path)?;
        log::info!("saved config to {}", path.display());
    }
    log::info!(
        "starting: lang={} page={} api={:?}",
        config.language,
        config.page.slug(),
        config.api_base
    );

    let ctx = AppContext::new(config.language);
    let layouts = paths::layouts_dir().map(LayoutStore::new);
    let mut session = Session::new(&config, ctx, layouts)?;

    let mut stdout = std::io::stdout();
    writeln!(stdout, "{}", session.render())?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        write!(stdout, "{}> ", session.page().slug())?;
        stdout.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let flow = match line.parse::<Command>() {
            Ok(command) => session.execute(command, &mut stdout).await,
            Err(e) => Err(e.into()),
        };
        match flow {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => {
                log::warn!("{e}");
                writeln!(stdout, "error: {e}")?;
            }
        }
        session.flush_toasts(&mut stdout)?;
    }

    log::info!("bye");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
