use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::error::MonitorError;
use crate::system::channel::SnapshotPublisher;
use crate::system::provider::{MetricsProvider, ProcessFields, ProcessProbe, RawProcess};
use crate::system::snapshot::{CycleStatus, ProcessMetric, SystemSnapshot};

pub const DEFAULT_SAMPLE_WINDOW: Duration = Duration::from_secs(1);

/// Shared flag checked once per cycle, before the process scan.
#[derive(Clone, Debug, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

pub struct SamplingLoop<P> {
    provider: P,
    sample_window: Duration,
    fields: ProcessFields,
    publisher: SnapshotPublisher,
    next_sequence: u64,
}

impl<P: MetricsProvider> SamplingLoop<P> {
    /// `sample_window_secs` must be finite and positive.
    pub fn new(
        provider: P,
        sample_window_secs: f64,
        fields: ProcessFields,
        publisher: SnapshotPublisher,
    ) -> Result<Self, MonitorError> {
        let sample_window = validate_sample_window(sample_window_secs)?;
        Ok(SamplingLoop {
            provider,
            sample_window,
            fields,
            publisher,
            next_sequence: 0,
        })
    }

    /// Run one full cycle and publish the result.
    pub fn run_cycle(&mut self) -> Arc<SystemSnapshot> {
        let _span = tracing::debug_span!("sampler.cycle", sequence = self.next_sequence).entered();

        let (processes, status) = match self.provider.list_processes(self.fields) {
            Ok(probes) => collect_processes(probes),
            Err(err) => {
                tracing::warn!(
                    sequence = self.next_sequence,
                    error = %err,
                    "process enumeration failed, publishing empty process list"
                );
                (Vec::new(), CycleStatus::ProviderUnavailable)
            }
        };

        // Blocks for the sample window and sets the loop cadence.
        let cpu_percent = sanitize_percent(self.provider.system_cpu_percent(self.sample_window));
        let memory_percent = sanitize_percent(self.provider.system_memory_percent());
        let gpu_percent = sanitize_percent(self.provider.gpu_percent());
        let network_percent = sanitize_percent(self.provider.network_percent());

        let sequence = self.next_sequence;
        self.next_sequence += 1;

        self.publisher.publish(SystemSnapshot {
            sequence,
            status,
            cpu_percent,
            memory_percent,
            gpu_percent,
            network_percent,
            processes,
        })
    }

    /// Cycle until `stop` is raised. Provider failures never end the loop.
    pub fn run(mut self, stop: &StopSignal) {
        tracing::info!(
            window_ms = self.sample_window.as_millis() as u64,
            "sampling loop started"
        );
        while !stop.is_stopped() {
            self.run_cycle();
        }
        tracing::info!(cycles = self.next_sequence, "sampling loop stopped");
    }
}

impl<P: MetricsProvider + Send + 'static> SamplingLoop<P> {
    /// Run the loop on a dedicated thread.
    pub fn spawn(self) -> Result<SamplerHandle, MonitorError> {
        let stop = StopSignal::new();
        let thread_stop = stop.clone();
        let thread = thread::Builder::new()
            .name("tasktop-sampler".to_string())
            .spawn(move || self.run(&thread_stop))?;
        Ok(SamplerHandle {
            stop,
            thread: Some(thread),
        })
    }
}

/// Owns the sampler thread. Dropping it raises the stop signal without
/// waiting; `shutdown` also joins.
pub struct SamplerHandle {
    stop: StopSignal,
    thread: Option<JoinHandle<()>>,
}

impl SamplerHandle {
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Stop the loop and wait for the in-flight cycle to end.
    pub fn shutdown(mut self) {
        self.stop.stop();
        if let Some(thread) = self.thread.take()
            && thread.join().is_err()
        {
            tracing::error!("sampler thread panicked");
        }
    }
}

impl Drop for SamplerHandle {
    fn drop(&mut self) {
        self.stop.stop();
    }
}

pub fn validate_sample_window(secs: f64) -> Result<Duration, MonitorError> {
    if !secs.is_finite() || secs <= 0.0 {
        return Err(MonitorError::InvalidSampleWindow(secs));
    }
    Duration::try_from_secs_f64(secs).map_err(|_| MonitorError::InvalidSampleWindow(secs))
}

fn collect_processes(probes: Vec<ProcessProbe>) -> (Vec<ProcessMetric>, CycleStatus) {
    let mut omitted = 0usize;
    let mut processes = Vec::with_capacity(probes.len());
    for probe in probes {
        match probe {
            Ok(raw) => processes.push(normalize_process(raw)),
            Err(err) => {
                tracing::debug!(error = %err, "process omitted from snapshot");
                omitted += 1;
            }
        }
    }
    let status = if omitted == 0 {
        CycleStatus::Complete
    } else {
        CycleStatus::Partial { omitted }
    };
    (processes, status)
}

fn normalize_process(raw: RawProcess) -> ProcessMetric {
    ProcessMetric {
        pid: raw.pid,
        name: raw.name.unwrap_or_default(),
        cpu_percent: raw
            .cpu_percent
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or(0.0),
        memory_percent: sanitize_percent(raw.memory_percent.unwrap_or(0.0)),
        memory_bytes: raw.memory_bytes.unwrap_or(0),
    }
}

fn sanitize_percent(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}
