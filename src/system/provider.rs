use std::time::Duration;

use serde::Deserialize;

use crate::error::MonitorError;

/// Raw per-process reading. Any attribute the OS did not report is `None`;
/// the sampling loop turns these into typed defaults.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawProcess {
    pub pid: u32,
    pub name: Option<String>,
    pub cpu_percent: Option<f32>,
    pub memory_percent: Option<f32>,
    pub memory_bytes: Option<u64>,
}

/// One enumerated process: either a reading or `ProcessVanished`.
pub type ProcessProbe = Result<RawProcess, MonitorError>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessField {
    Cpu,
    Memory,
}

/// Optional process attributes to request. PID and name are always read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProcessFields {
    pub cpu: bool,
    pub memory: bool,
}

impl ProcessFields {
    pub fn from_list(fields: &[ProcessField]) -> Self {
        ProcessFields {
            cpu: fields.contains(&ProcessField::Cpu),
            memory: fields.contains(&ProcessField::Memory),
        }
    }
}

impl Default for ProcessFields {
    fn default() -> Self {
        ProcessFields {
            cpu: true,
            memory: true,
        }
    }
}

/// Source of OS-level metrics.
///
/// GPU and network readings are not implemented by any provider yet. The
/// default methods report a neutral 0.0 so the metrics stay visible without
/// breaking the cycle; a provider that can measure them overrides these.
pub trait MetricsProvider {
    /// Enumerate live processes. Fails with `ProviderUnavailable` only when
    /// the process table cannot be read at all.
    fn list_processes(&mut self, fields: ProcessFields) -> Result<Vec<ProcessProbe>, MonitorError>;

    /// Whole-system CPU usage measured over `sample_window`. Blocks for up to
    /// that long, which paces the sampling loop.
    fn system_cpu_percent(&mut self, sample_window: Duration) -> f32;

    fn system_memory_percent(&mut self) -> f32;

    fn gpu_percent(&mut self) -> f32 {
        0.0
    }

    fn network_percent(&mut self) -> f32 {
        0.0
    }
}

impl<P: MetricsProvider + ?Sized> MetricsProvider for Box<P> {
    fn list_processes(&mut self, fields: ProcessFields) -> Result<Vec<ProcessProbe>, MonitorError> {
        (**self).list_processes(fields)
    }

    fn system_cpu_percent(&mut self, sample_window: Duration) -> f32 {
        (**self).system_cpu_percent(sample_window)
    }

    fn system_memory_percent(&mut self) -> f32 {
        (**self).system_memory_percent()
    }

    fn gpu_percent(&mut self) -> f32 {
        (**self).gpu_percent()
    }

    fn network_percent(&mut self) -> f32 {
        (**self).network_percent()
    }
}
