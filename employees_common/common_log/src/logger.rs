use chrono::{DateTime, Local};
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::rolling_file::policy::compound::roll::fixed_window::FixedWindowRoller;
use log4rs::append::rolling_file::policy::compound::trigger::size::SizeTrigger as SizeBasedTriggerPolicy;
use log4rs::append::rolling_file::policy::compound::CompoundPolicy;
use log4rs::{
    append::rolling_file::RollingFileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    Config, Handle,
};
use crate::config::{FileConfig, LogConfig};
use crate::LogError;

const CONSOLE_APPENDER: &str = "console_appender";
const FILE_APPENDER: &str = "file_appender";

pub struct Logger {
    handle: Handle,
}

impl Logger {
    pub fn new_from_config(config: &LogConfig) -> Result<Self, LogError> {
        let log4rs_config = Self::build_config(config)?;
        let handle = log4rs::init_config(log4rs_config).map_err(|e| LogError::Init(e.to_string()))?;
        Ok(Self { handle })
    }

    /// Swaps the active configuration without re-registering the global logger.
    pub fn reload(&self, config: &LogConfig) -> Result<(), LogError> {
        let log4rs_config = Self::build_config(config)?;
        self.handle.set_config(log4rs_config);
        Ok(())
    }

    pub(crate) fn build_config(config: &LogConfig) -> Result<Config, LogError> {
        let mut log4rs_config = Config::builder();
        let mut appender_names = Vec::new();

        if config.console {
            let console = ConsoleAppender::builder()
                .encoder(Box::new(PatternEncoder::new(&config.pattern)))
                .build();
            log4rs_config = log4rs_config
                .appender(Appender::builder().build(CONSOLE_APPENDER, Box::new(console)));
            appender_names.push(CONSOLE_APPENDER);
        }

        if let Some(file_config) = &config.file {
            let appender = Self::create_appender(file_config, &config.pattern)?;
            log4rs_config = log4rs_config
                .appender(Appender::builder().build(FILE_APPENDER, Box::new(appender)));
            appender_names.push(FILE_APPENDER);
        }

        // Module overrides share the root appenders
        for logger_config in &config.loggers {
            let logger = log4rs::config::Logger::builder()
                .build(logger_config.path_prefix.clone(), Self::parse_level(&logger_config.level));
            log4rs_config = log4rs_config.logger(logger);
        }

        let root = Root::builder()
            .appenders(appender_names)
            .build(Self::parse_level(&config.level));
        log4rs_config.build(root).map_err(|e| LogError::Config(e.to_string()))
    }

    fn create_appender(config: &FileConfig, pattern: &str) -> Result<RollingFileAppender, LogError> {
        std::fs::create_dir_all(&config.log_directory)
            .map_err(|e| LogError::Init(format!("{}: {}", config.log_directory, e)))?;

        let now: DateTime<Local> = Local::now();
        let formatted_time = now.format("%Y%m%d%H%M%S%3f").to_string();

        let log_file = format!("{}/{}", config.log_directory, config.log_file_name);
        let archived_log_pattern = format!(
            "{}/{}-{{}}-{}.gz",
            config.log_directory, config.log_file_name, formatted_time
        );

        let size_trigger = SizeBasedTriggerPolicy::new(config.max_file_size);
        let roller = FixedWindowRoller::builder()
            .build(&archived_log_pattern, config.max_zip_count)
            .map_err(|e| LogError::Config(e.to_string()))?;
        let compound_policy = CompoundPolicy::new(Box::new(size_trigger), Box::new(roller));

        RollingFileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(pattern)))
            .build(log_file, Box::new(compound_policy))
            .map_err(|e| LogError::Init(e.to_string()))
    }

    pub(crate) fn parse_level(level: &str) -> LevelFilter {
        match level.to_lowercase().as_str() {
            "trace" => LevelFilter::Trace,
            "debug" => LevelFilter::Debug,
            "info" => LevelFilter::Info,
            "warn" => LevelFilter::Warn,
            "error" => LevelFilter::Error,
            "off" => LevelFilter::Off,
            _ => LevelFilter::Info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoggerConfig;

    #[test]
    fn test_parse_level() {
        assert_eq!(Logger::parse_level("DEBUG"), LevelFilter::Debug);
        assert_eq!(Logger::parse_level("off"), LevelFilter::Off);
        assert_eq!(Logger::parse_level("verbose"), LevelFilter::Info);
    }

    #[test]
    fn test_build_config_console_only() {
        let mut config = LogConfig::default();
        config.loggers.push(LoggerConfig { path_prefix: "rdb".to_string(), level: "debug".to_string() });
        let built = Logger::build_config(&config).unwrap();
        assert_eq!(built.appenders().len(), 1);
        assert_eq!(built.root().level(), LevelFilter::Info);
        assert_eq!(built.loggers()[0].name(), "rdb");
    }

    #[test]
    fn test_build_config_with_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = LogConfig {
            console: false,
            file: Some(FileConfig {
                log_directory: dir.path().join("logs").display().to_string(),
                log_file_name: "employees.log".to_string(),
                max_file_size: 1024,
                max_zip_count: 2,
            }),
            ..LogConfig::default()
        };
        let built = Logger::build_config(&config).unwrap();
        assert_eq!(built.appenders().len(), 1);
        assert_eq!(built.appenders()[0].name(), FILE_APPENDER);
        assert!(dir.path().join("logs").is_dir());
    }
}
