use std::{path::PathBuf, str::FromStr, time::Duration};

use club_app::domain::{leaderboard::DEFAULT_LEADERBOARD_SIZE, session::CurrentUser};
use log::LevelFilter;

const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60 * 60;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogConfig {
    pub file_path: String,
    pub archive_pattern: String,
    pub console_level: LevelFilter,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub log: LogConfig,
    pub sweep_interval: Duration,
    pub leaderboard_size: usize,
    pub store_seed: Option<PathBuf>,
    pub session_user: Option<CurrentUser>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));
        let positive = |key: &'static str, default: u64| -> Result<u64, ConfigError> {
            match lookup(key) {
                None => Ok(default),
                Some(value) => match value.trim().parse::<u64>() {
                    Ok(parsed) if parsed > 0 => Ok(parsed),
                    _ => Err(ConfigError::Invalid { key, value }),
                },
            }
        };

        let console_level = match lookup("CLUB_LOG_LEVEL") {
            None => LevelFilter::Info,
            Some(value) => LevelFilter::from_str(value.trim()).map_err(|_| ConfigError::Invalid {
                key: "CLUB_LOG_LEVEL",
                value,
            })?,
        };
        let log = LogConfig {
            file_path: required("LOG_FILE_PATH")?,
            archive_pattern: required("LOG_ARCHIVE_PATTERN")?,
            console_level,
        };
        let sweep_interval = Duration::from_secs(positive(
            "CLUB_SWEEP_INTERVAL_SECS",
            DEFAULT_SWEEP_INTERVAL_SECS,
        )?);
        let leaderboard_size =
            positive("CLUB_LEADERBOARD_SIZE", DEFAULT_LEADERBOARD_SIZE as u64)? as usize;

        let session_user = lookup("CLUB_SESSION_EMAIL")
            .filter(|email| !email.trim().is_empty())
            .map(|email| CurrentUser {
                email: email.trim().to_string(),
                display_name: lookup("CLUB_SESSION_NAME"),
                photo_url: None,
            });

        Ok(Self {
            log,
            sweep_interval,
            leaderboard_size,
            store_seed: lookup("CLUB_STORE_SEED").map(PathBuf::from),
            session_user,
        })
    }
}
