use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::Config;
use crate::errors::ConfigError;
use crate::initialization::General;

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l} {t} - {m}{n}";

/// Sets up log4rs with a console appender and, if a log path is configured, a file appender
///
/// # Arguments
///
/// * 'general' - general configuration holding log level and targets
pub fn setup_logger(general: &General) -> Result<(), ConfigError> {
    let level = parse_level(&general.log_level)?;
    let mut builder = Config::builder();
    let mut root = Root::builder();

    if general.log_to_stdout {
        let stdout = ConsoleAppender::builder()
            .encoder(Box::new(PatternEncoder::new(PATTERN)))
            .build();
        builder = builder.appender(Appender::builder().build("stdout", Box::new(stdout)));
        root = root.appender("stdout");
    }

    if let Some(log_path) = &general.log_path {
        let file = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(PATTERN)))
            .build(log_path)?;
        builder = builder.appender(Appender::builder().build("file", Box::new(file)));
        root = root.appender("file");
    }

    let config = builder.build(root.build(level))?;
    log4rs::init_config(config)?;

    Ok(())
}

/// Parses a log level name, e.g. 'info' or 'DEBUG'
///
/// # Arguments
///
/// * 'level' - name of the level
fn parse_level(level: &str) -> Result<LevelFilter, ConfigError> {
    level.parse::<LevelFilter>()
        .map_err(|_| ConfigError(format!("unknown log level: {}", level)))
}
