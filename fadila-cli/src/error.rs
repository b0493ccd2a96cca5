use std::io;

use fadila_lib::error::ApiError;
use fadila_lib::error::ScheduleError;
use fadila_lib::error::ValidationError;
use fadila_ui::GridError;
use thiserror::Error;

use crate::command::CommandError;
use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("no row with id {0}")]
    UnknownRow(String),
    #[error("`{0}` is only available on the teachers page")]
    WrongPage(&'static str),
    #[error("cannot start logger: {0}")]
    Logger(#[from] log::SetLoggerError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
