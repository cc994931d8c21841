use crate::errors::{OrderBotError, OrderBotResult};
use log::LevelFilter;
use std::fmt::{Debug, Formatter};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const TOKEN_ENV: &str = "ORDER_BOT_TOKEN";
pub const PREFIX_ENV: &str = "ORDER_BOT_PREFIX";
pub const ORDERS_FILE_ENV: &str = "ORDER_BOT_ORDERS_FILE";
pub const LOG_FILE_ENV: &str = "ORDER_BOT_LOG_FILE";
pub const LOG_LEVEL_ENV: &str = "ORDER_BOT_LOG_LEVEL";
pub const POLL_TIMEOUT_ENV: &str = "ORDER_BOT_POLL_TIMEOUT_SECS";

pub const DEFAULT_PREFIX: &str = "!";
pub const DEFAULT_ORDERS_FILE: &str = "orders.json";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;
pub const DEFAULT_POLL_TIMEOUT_SECS: u64 = 30;

/// Process configuration of the bot.
#[derive(Clone)]
pub struct BotSettings {
    pub token: String,
    pub prefix: String,
    pub orders_file: PathBuf,
    pub log_file: Option<PathBuf>,
    pub log_level: LevelFilter,
    pub poll_timeout: Duration,
}

impl Debug for BotSettings {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotSettings")
            .field("token", &"<redacted>")
            .field("prefix", &self.prefix)
            .field("orders_file", &self.orders_file)
            .field("log_file", &self.log_file)
            .field("log_level", &self.log_level)
            .field("poll_timeout", &self.poll_timeout)
            .finish()
    }
}

impl BotSettings {
    /// Reads the settings from the process environment, after loading `.env` if it exists.
    pub fn from_env() -> OrderBotResult<Self> {
        let _ = dotenv::dotenv();
        Self::from_lookup(|name| dotenv::var(name).ok())
    }

    /// Builds the settings from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> OrderBotResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(TOKEN_ENV)
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| {
                OrderBotError::Configuration(format!("{} is not set", TOKEN_ENV))
            })?;

        let prefix = lookup(PREFIX_ENV).unwrap_or_else(|| DEFAULT_PREFIX.to_string());
        if prefix.is_empty() {
            return Err(OrderBotError::Configuration(format!(
                "{} must not be empty",
                PREFIX_ENV
            )));
        }

        let orders_file = lookup(ORDERS_FILE_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ORDERS_FILE));

        let log_file = lookup(LOG_FILE_ENV)
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        let log_level = match lookup(LOG_LEVEL_ENV) {
            Some(level) => LevelFilter::from_str(&level).map_err(|_| {
                OrderBotError::Configuration(format!(
                    "{} has an unknown log level: {}",
                    LOG_LEVEL_ENV, level
                ))
            })?,
            None => DEFAULT_LOG_LEVEL,
        };

        let poll_timeout_secs = match lookup(POLL_TIMEOUT_ENV) {
            Some(secs) => secs.parse::<u64>().map_err(|_| {
                OrderBotError::Configuration(format!(
                    "{} must be a number of seconds, got {}",
                    POLL_TIMEOUT_ENV, secs
                ))
            })?,
            None => DEFAULT_POLL_TIMEOUT_SECS,
        };

        Ok(Self {
            token,
            prefix,
            orders_file,
            log_file,
            log_level,
            poll_timeout: Duration::from_secs(poll_timeout_secs),
        })
    }
}
