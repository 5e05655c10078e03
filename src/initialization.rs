use std::env;
use std::fs;
use serde::Deserialize;
use crate::errors::ConfigError;
use crate::logging::setup_logger;

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Deserialize)]
pub struct General {
    #[serde(default)]
    pub log_path: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_true")]
    pub log_to_stdout: bool,
}

#[derive(Deserialize)]
pub struct WebServerParameters {
    pub bind_address: String,
    pub bind_port: u16,
}

#[derive(Deserialize)]
pub struct DataBaseParameters {
    pub db_path: String,
}

#[derive(Deserialize)]
pub struct OWMParameters {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_icon_base_url")]
    pub icon_base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

#[derive(Deserialize)]
pub struct ForecastParameters {
    #[serde(default = "default_days")]
    pub days: usize,
    #[serde(default = "default_city")]
    pub default_city: String,
}

#[derive(Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: General,
    pub web_server: WebServerParameters,
    pub db: DataBaseParameters,
    #[serde(default)]
    pub owm: OWMParameters,
    #[serde(default)]
    pub forecast: ForecastParameters,
}

fn default_log_level() -> String { "info".to_string() }
fn default_true() -> bool { true }
fn default_base_url() -> String { "https://api.openweathermap.org/data/2.5".to_string() }
fn default_icon_base_url() -> String { "https://openweathermap.org/img/wn".to_string() }
fn default_timeout() -> u64 { 30 }
fn default_days() -> usize { 5 }
fn default_city() -> String { "London".to_string() }

impl Default for General {
    fn default() -> Self {
        Self { log_path: None, log_level: default_log_level(), log_to_stdout: true }
    }
}

impl Default for OWMParameters {
    fn default() -> Self {
        Self { base_url: default_base_url(), icon_base_url: default_icon_base_url(), timeout_secs: default_timeout() }
    }
}

impl Default for ForecastParameters {
    fn default() -> Self {
        Self { days: default_days(), default_city: default_city() }
    }
}

/// Loads the configuration file and sets up logging
///
/// The path is taken from a '--config=<path>' argument, then the CONFIG_PATH environment
/// variable, and falls back to 'config.toml' in the working directory.
pub fn config() -> Result<Config, ConfigError> {
    let path = config_path(env::args(), env::var("CONFIG_PATH").ok());
    let config = load_config(&path)?;

    setup_logger(&config.general)?;
    log::info!("configuration loaded from {}", path);

    Ok(config)
}

/// Resolves which configuration file to use
///
/// # Arguments
///
/// * 'args' - command line arguments
/// * 'env_path' - value of the CONFIG_PATH environment variable, if set
fn config_path(args: impl Iterator<Item = String>, env_path: Option<String>) -> String {
    args.filter_map(|a| a.strip_prefix("--config=").map(str::to_string))
        .next()
        .or(env_path)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
}

/// Reads and parses the configuration file
///
/// # Arguments
///
/// * 'path' - path to the toml file
fn load_config(path: &str) -> Result<Config, ConfigError> {
    let toml = fs::read_to_string(path)?;
    parse_config(&toml)
}

fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(toml)?;

    if config.forecast.days == 0 {
        return Err(ConfigError::from("forecast.days must be at least 1"));
    }

    Ok(config)
}
