use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::MonitorError;
use crate::system::history::DEFAULT_CAPACITY;
use crate::system::provider::{ProcessField, ProcessFields};
use crate::system::sampler::{DEFAULT_SAMPLE_WINDOW, validate_sample_window};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sampling: SamplingConfig,
    pub history: HistoryConfig,
    pub logging: LoggingConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    pub sample_window_secs: f64,
    pub process_fields: Vec<ProcessField>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        SamplingConfig {
            sample_window_secs: DEFAULT_SAMPLE_WINDOW.as_secs_f64(),
            process_fields: vec![ProcessField::Cpu, ProcessField::Memory],
        }
    }
}

impl SamplingConfig {
    pub fn fields(&self) -> ProcessFields {
        ProcessFields::from_list(&self.process_fields)
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        HistoryConfig {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub theme: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            theme: "dark".to_string(),
        }
    }
}

impl Config {
    /// Reject values the sampler cannot start with.
    pub fn validate(&self) -> Result<(), MonitorError> {
        validate_sample_window(self.sampling.sample_window_secs)?;
        if self.history.capacity == 0 {
            return Err(MonitorError::InvalidCapacity(self.history.capacity));
        }
        Ok(())
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("tasktop").join("config.toml"))
}

pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|p| p.join("tasktop").join("tasktop.log"))
}

/// Load the config file from the default location.
///
/// A missing file yields defaults. A file that cannot be read or parsed also
/// yields defaults, and the reason is returned so the caller can report it
/// once logging is up.
pub fn load_config() -> (Config, Option<MonitorError>) {
    match config_path() {
        Some(path) if path.exists() => load_or_default(&path),
        _ => (Config::default(), None),
    }
}

pub fn load_or_default(path: &Path) -> (Config, Option<MonitorError>) {
    match load_config_from_path(path) {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    }
}

/// Load an explicitly requested config file. Any failure is an error.
pub fn load_config_from_path(path: &Path) -> Result<Config, MonitorError> {
    let contents =
        std::fs::read_to_string(path).map_err(|err| MonitorError::config_file(path, err))?;
    toml::from_str(&contents).map_err(|err| MonitorError::config_file(path, err))
}
