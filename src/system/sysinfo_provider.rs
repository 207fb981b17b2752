use std::time::Duration;

use sysinfo::{ProcessRefreshKind, ProcessStatus, ProcessesToUpdate, System};

use crate::error::MonitorError;
use crate::system::provider::{MetricsProvider, ProcessFields, ProcessProbe, RawProcess};

/// `MetricsProvider` backed by `sysinfo`.
///
/// Per-process CPU is divided by the logical CPU count, so a process that
/// saturates the whole machine reads 100% just like the system-wide figure.
/// Both are deltas over one sampling cycle, since each is refreshed exactly
/// once per cycle.
pub struct SysinfoProvider {
    sys: System,
}

impl Default for SysinfoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoProvider {
    pub fn new() -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_cpu_all();
        // Prime the CPU counters so the first cycle reports a real delta.
        sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_cpu().with_memory(),
        );
        SysinfoProvider { sys }
    }

    fn logical_cpus(&self) -> f32 {
        self.sys.cpus().len().max(1) as f32
    }
}

/// How long a CPU measurement actually blocks for a requested window.
/// sysinfo needs at least `MINIMUM_CPU_UPDATE_INTERVAL` between refreshes.
pub fn cpu_measurement_window(requested: Duration) -> Duration {
    requested.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL)
}

fn refresh_kind(fields: ProcessFields) -> ProcessRefreshKind {
    let mut kind = ProcessRefreshKind::nothing();
    if fields.cpu {
        kind = kind.with_cpu();
    }
    if fields.memory {
        kind = kind.with_memory();
    }
    kind
}

impl MetricsProvider for SysinfoProvider {
    fn list_processes(&mut self, fields: ProcessFields) -> Result<Vec<ProcessProbe>, MonitorError> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(MonitorError::unavailable(
                "process metrics are not supported on this platform",
            ));
        }

        if fields.memory {
            self.sys.refresh_memory();
        }
        self.sys
            .refresh_processes_specifics(ProcessesToUpdate::All, true, refresh_kind(fields));

        if self.sys.processes().is_empty() {
            return Err(MonitorError::unavailable("process table is empty"));
        }

        let total_memory = self.sys.total_memory();
        let cpus = self.logical_cpus();

        let mut probes: Vec<(u32, ProcessProbe)> = self
            .sys
            .processes()
            .iter()
            .map(|(pid, process)| {
                let pid = pid.as_u32();
                if matches!(process.status(), ProcessStatus::Zombie | ProcessStatus::Dead) {
                    return (pid, Err(MonitorError::ProcessVanished { pid }));
                }

                let name = process.name().to_string_lossy().to_string();
                let memory_bytes = fields.memory.then(|| process.memory());
                let memory_percent = memory_bytes
                    .filter(|_| total_memory > 0)
                    .map(|bytes| (bytes as f64 / total_memory as f64 * 100.0) as f32);

                let raw = RawProcess {
                    pid,
                    name: (!name.is_empty()).then_some(name),
                    cpu_percent: fields.cpu.then(|| process.cpu_usage() / cpus),
                    memory_percent,
                    memory_bytes,
                };
                (pid, Ok(raw))
            })
            .collect();

        probes.sort_unstable_by_key(|(pid, _)| *pid);
        Ok(probes.into_iter().map(|(_, probe)| probe).collect())
    }

    fn system_cpu_percent(&mut self, sample_window: Duration) -> f32 {
        self.sys.refresh_cpu_usage();
        std::thread::sleep(cpu_measurement_window(sample_window));
        self.sys.refresh_cpu_usage();
        self.sys.global_cpu_usage()
    }

    fn system_memory_percent(&mut self) -> f32 {
        self.sys.refresh_memory();
        let total = self.sys.total_memory();
        if total == 0 {
            return 0.0;
        }
        (self.sys.used_memory() as f64 / total as f64 * 100.0) as f32
    }
}
