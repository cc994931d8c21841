use anyhow::{anyhow, Result};
use base::settings::BotSettings;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::rolling_file::policy::compound::roll::fixed_window::FixedWindowRoller;
use log4rs::append::rolling_file::policy::compound::trigger::size::SizeTrigger;
use log4rs::append::rolling_file::policy::compound::CompoundPolicy;
use log4rs::append::rolling_file::RollingFileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::Handle;

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} {h({l})} {t} - {m}{n}";

const LOG_FILE_SIZE_LIMIT: u64 = 10 * 1024 * 1024;
const NUMBER_OF_LOG_ARCHIVES: u32 = 5;

const CONSOLE_APPENDER: &str = "console";
const FILE_APPENDER: &str = "file";

pub fn build_log_config(settings: &BotSettings) -> Result<Config> {
    let console = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();

    let mut config = Config::builder()
        .appender(Appender::builder().build(CONSOLE_APPENDER, Box::new(console)));
    let mut root = Root::builder().appender(CONSOLE_APPENDER);

    if let Some(log_file) = &settings.log_file {
        let archive_pattern = format!("{}.{{}}.gz", log_file.display());
        let roller = FixedWindowRoller::builder()
            .build(&archive_pattern, NUMBER_OF_LOG_ARCHIVES)
            .map_err(|e| anyhow!("an error occurred on creating a log roller: {}", e))?;

        let policy = CompoundPolicy::new(
            Box::new(SizeTrigger::new(LOG_FILE_SIZE_LIMIT)),
            Box::new(roller),
        );

        let file = RollingFileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build(log_file, Box::new(policy))?;

        config = config.appender(Appender::builder().build(FILE_APPENDER, Box::new(file)));
        root = root.appender(FILE_APPENDER);
    }

    Ok(config.build(root.build(settings.log_level))?)
}

pub fn init_logger(settings: &BotSettings) -> Result<Handle> {
    let config = build_log_config(settings)?;
    Ok(log4rs::init_config(config)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base::settings::TOKEN_ENV;
    use tempfile::TempDir;

    fn settings_with(log_file: Option<String>) -> BotSettings {
        BotSettings::from_lookup(|name| match name {
            TOKEN_ENV => Some(String::from("secret")),
            base::settings::LOG_FILE_ENV => log_file.clone(),
            _ => None,
        })
        .unwrap()
    }

    #[test]
    #[allow(non_snake_case)]
    fn build_log_config__no_log_file__console_only() {
        let config = build_log_config(&settings_with(None)).unwrap();

        assert_eq!(config.appenders().len(), 1);
        assert_eq!(config.root().appenders(), &[CONSOLE_APPENDER.to_string()]);
    }

    #[test]
    #[allow(non_snake_case)]
    fn build_log_config__log_file__console_and_rolling_file() {
        let dir = TempDir::new().unwrap();
        let log_file = dir.path().join("order_bot.log");

        let config =
            build_log_config(&settings_with(Some(log_file.display().to_string()))).unwrap();

        assert_eq!(config.appenders().len(), 2);
        assert_eq!(
            config.root().appenders(),
            &[CONSOLE_APPENDER.to_string(), FILE_APPENDER.to_string()]
        );
    }
}
