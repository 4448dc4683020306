//! Logger and logging macros
//!
//! For the macros to properly compile, the calling crate must add a dependency to
//! crate log (ie. `log.workspace = true`).

use log::LevelFilter;
use log4rs::config::{Config, Root};
use thiserror::Error;

mod appender;
mod filters;

pub use filters::{FilterSpec, Filters};

use appender::AppenderSpec;

pub const DEFAULT_LOGGER_ENV: &str = "RUST_LOG";

pub const LOG_FILE_NAME: &str = "zkarchive.log";
pub const ERR_LOG_FILE_NAME: &str = "zkarchive_err.log";

const CONSOLE_APPENDER: &str = "stdout";
const LOG_FILE_APPENDER: &str = "log_file";
const ERR_LOG_FILE_APPENDER: &str = "err_log_file";

#[derive(Debug, Error)]
pub enum LogError {
    #[error("invalid logger filter '{0}'")]
    InvalidFilter(String),

    #[error("cannot create log file appender in '{0}': {1}")]
    FileAppender(String, String),

    #[error("logger configuration rejected: {0}")]
    Config(String),

    #[error("a global logger is already installed")]
    AlreadyInstalled,
}

pub type LogResult<T> = std::result::Result<T, LogError>;

/// Installs the process-wide logger.
///
/// `filters` follows the `RUST_LOG` syntax (`info,zkarchive_consensus=trace`) and is applied on
/// top of whatever the `RUST_LOG` environment variable holds. When `log_dir` is provided, two
/// size-rolled files are written there in addition to stdout: a full log and a warn-and-above log.
pub fn init_logger(log_dir: Option<&str>, filters: &str) -> LogResult<()> {
    let filters = Filters::builder().root_level(LevelFilter::Info).parse_env(DEFAULT_LOGGER_ENV).parse_expression(filters).build();

    let mut appenders = vec![AppenderSpec::console(CONSOLE_APPENDER, None)];
    if let Some(dir) = log_dir {
        appenders.push(AppenderSpec::roller(LOG_FILE_APPENDER, None, dir, LOG_FILE_NAME)?);
        appenders.push(AppenderSpec::roller(ERR_LOG_FILE_APPENDER, Some(LevelFilter::Warn), dir, ERR_LOG_FILE_NAME)?);
    }

    let names = appenders.iter().map(|spec| spec.name).collect::<Vec<_>>();
    let config = Config::builder()
        .appenders(appenders.into_iter().map(AppenderSpec::into_appender))
        .loggers(filters.loggers())
        .build(Root::builder().appenders(names.iter().copied()).build(filters.root_level()))
        .map_err(|err| LogError::Config(err.to_string()))?;

    log4rs::init_config(config).map_err(|_| LogError::AlreadyInstalled)?;
    Ok(())
}

#[macro_export]
macro_rules! trace {
    ($($t:tt)*) => (
        log::trace!($($t)*);
    )
}

#[macro_export]
macro_rules! debug {
    ($($t:tt)*) => (
        log::debug!($($t)*);
    )
}

#[macro_export]
macro_rules! info {
    ($($t:tt)*) => (
        log::info!($($t)*);
    )
}

#[macro_export]
macro_rules! warn {
    ($($t:tt)*) => (
        log::warn!($($t)*);
    )
}

#[macro_export]
macro_rules! error {
    ($($t:tt)*) => (
        log::error!($($t)*);
    )
}
