use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised by the sampling core.
///
/// Only the configuration variants ever reach the caller. Provider and
/// per-process failures are absorbed by the sampling loop.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("metrics provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("process {pid} vanished during enumeration")]
    ProcessVanished { pid: u32 },

    #[error("history capacity must be at least 1, got {0}")]
    InvalidCapacity(usize),

    #[error("sample window must be a positive number of seconds, got {0}")]
    InvalidSampleWindow(f64),

    #[error("failed to spawn sampler thread: {0}")]
    SamplerSpawn(#[from] std::io::Error),

    #[error("cannot use config file {}: {reason}", path.display())]
    ConfigFile { path: PathBuf, reason: String },
}

impl MonitorError {
    pub fn unavailable<S: Into<String>>(reason: S) -> Self {
        MonitorError::ProviderUnavailable(reason.into())
    }

    pub fn config_file<S: ToString>(path: &Path, reason: S) -> Self {
        MonitorError::ConfigFile {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MonitorError>;
