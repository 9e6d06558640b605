use log::LevelFilter;
use log4rs::{
    Config,
    append::{
        console::{ConsoleAppender, Target},
        rolling_file::{
            RollingFileAppender,
            policy::compound::{
                CompoundPolicy, roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger,
            },
        },
    },
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
};

use crate::config::LogConfig;

const CONSOLE: &str = "console";
const ROLLING_FILE: &str = "rolling_file";

/// Rotate once the active file reaches 10 MB.
const ROTATE_AT_BYTES: u64 = 10 * 1024 * 1024;
const ARCHIVES_KEPT: u32 = 3;

/// The file always records at least debug output, more if the console asks for it.
const FILE_FLOOR: LevelFilter = LevelFilter::Debug;

const CONSOLE_PATTERN: &str = "{h({l:<5})} {t} - {m}{n}";
const FILE_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l:<5} {t} - {m}{n}";

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("invalid log archive pattern: {0}")]
    ArchivePattern(String),
    #[error("failed to open log file: {0}")]
    LogFile(#[from] std::io::Error),
    #[error("invalid logger configuration: {0}")]
    Config(#[from] log4rs::config::runtime::ConfigErrors),
    #[error("logger already installed: {0}")]
    AlreadyInstalled(#[from] log::SetLoggerError),
}

fn filtered(name: &str, level: LevelFilter, appender: Box<dyn log4rs::append::Append>) -> Appender {
    Appender::builder()
        .filter(Box::new(ThresholdFilter::new(level)))
        .build(name, appender)
}

fn console_appender(level: LevelFilter) -> Appender {
    let console = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(CONSOLE_PATTERN)))
        .build();
    filtered(CONSOLE, level, Box::new(console))
}

fn rolling_file_appender(log_config: &LogConfig, level: LevelFilter) -> Result<Appender, LoggerError> {
    let roller = FixedWindowRoller::builder()
        .build(&log_config.archive_pattern, ARCHIVES_KEPT)
        .map_err(|e| LoggerError::ArchivePattern(e.to_string()))?;
    let rotation = CompoundPolicy::new(
        Box::new(SizeTrigger::new(ROTATE_AT_BYTES)),
        Box::new(roller),
    );

    let file = RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(FILE_PATTERN)))
        .build(&log_config.file_path, Box::new(rotation))?;
    Ok(filtered(ROLLING_FILE, level, Box::new(file)))
}

fn logger_config(log_config: &LogConfig) -> Result<Config, LoggerError> {
    let console_level = log_config.console_level;
    let file_level = console_level.max(FILE_FLOOR);

    let root = Root::builder()
        .appender(CONSOLE)
        .appender(ROLLING_FILE)
        .build(file_level);

    Ok(Config::builder()
        .appender(console_appender(console_level))
        .appender(rolling_file_appender(log_config, file_level)?)
        .build(root)?)
}

/// Installs the global logger: console output on stderr at the configured
/// level, plus a size-rotated log file.
pub fn init_logger(log_config: &LogConfig) -> Result<(), LoggerError> {
    log4rs::init_config(logger_config(log_config)?)?;
    log::debug!(
        "Logging to {} (console at {})",
        log_config.file_path,
        log_config.console_level
    );
    Ok(())
}
