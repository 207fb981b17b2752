use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use tasktop::error::MonitorError;
use tasktop::system::channel::snapshot_channel;
use tasktop::system::provider::{MetricsProvider, ProcessFields, ProcessProbe, RawProcess};
use tasktop::system::sampler::{SamplerHandle, SamplingLoop, StopSignal};
use tasktop::system::snapshot::CycleStatus;

/// What `list_processes` returns on a given call.
enum Script {
    Processes(Vec<u32>),
    Unavailable,
    WithVanished { alive: Vec<u32>, vanished: Vec<u32> },
}

struct ScriptedProvider {
    script: VecDeque<Script>,
    cpu: f32,
    pace: Duration,
    fields_seen: Arc<Mutex<Vec<ProcessFields>>>,
}

impl ScriptedProvider {
    fn new(script: Vec<Script>) -> Self {
        ScriptedProvider {
            script: script.into(),
            cpu: 25.0,
            pace: Duration::ZERO,
            fields_seen: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

fn raw(pid: u32) -> ProcessProbe {
    Ok(RawProcess {
        pid,
        name: Some(format!("proc{pid}")),
        cpu_percent: Some(1.5),
        memory_percent: None,
        memory_bytes: Some(u64::from(pid) * 1024),
    })
}

impl MetricsProvider for ScriptedProvider {
    fn list_processes(&mut self, fields: ProcessFields) -> Result<Vec<ProcessProbe>, MonitorError> {
        self.fields_seen.lock().unwrap().push(fields);
        match self.script.pop_front().unwrap_or(Script::Processes(vec![1])) {
            Script::Processes(pids) => Ok(pids.into_iter().map(raw).collect()),
            Script::Unavailable => Err(MonitorError::unavailable("scripted outage")),
            Script::WithVanished { alive, vanished } => {
                let mut probes: Vec<ProcessProbe> = alive.into_iter().map(raw).collect();
                probes.extend(
                    vanished
                        .into_iter()
                        .map(|pid| Err(MonitorError::ProcessVanished { pid })),
                );
                Ok(probes)
            }
        }
    }

    fn system_cpu_percent(&mut self, _sample_window: Duration) -> f32 {
        if !self.pace.is_zero() {
            thread::sleep(self.pace);
        }
        self.cpu
    }

    fn system_memory_percent(&mut self) -> f32 {
        40.0
    }
}

fn pids(snapshot: &tasktop::system::snapshot::SystemSnapshot) -> Vec<u32> {
    snapshot.processes.iter().map(|p| p.pid).collect()
}

#[test]
fn sequence_starts_at_zero_and_increments_by_one() {
    let (tx, _rx) = snapshot_channel();
    let mut sampler =
        SamplingLoop::new(ScriptedProvider::new(vec![]), 1.0, ProcessFields::default(), tx).unwrap();

    let sequences: Vec<u64> = (0..5).map(|_| sampler.run_cycle().sequence).collect();
    assert_eq!(sequences, vec![0, 1, 2, 3, 4]);
}

#[test]
fn provider_outage_yields_empty_snapshot_then_recovers() {
    let provider = ScriptedProvider::new(vec![Script::Unavailable, Script::Processes(vec![1, 2])]);
    let (tx, _rx) = snapshot_channel();
    let mut sampler = SamplingLoop::new(provider, 1.0, ProcessFields::default(), tx).unwrap();

    let first = sampler.run_cycle();
    assert!(first.processes.is_empty());
    assert_eq!(first.status, CycleStatus::ProviderUnavailable);
    assert_eq!(first.cpu_percent, 25.0);
    assert_eq!(first.memory_percent, 40.0);

    let second = sampler.run_cycle();
    assert_eq!(pids(&second), vec![1, 2]);
    assert_eq!(second.status, CycleStatus::Complete);
    assert_eq!(second.sequence, first.sequence + 1);
}

#[test]
fn exited_process_is_simply_absent_next_cycle() {
    let provider = ScriptedProvider::new(vec![
        Script::Processes(vec![1, 2, 3]),
        Script::Processes(vec![1, 3]),
    ]);
    let (tx, _rx) = snapshot_channel();
    let mut sampler = SamplingLoop::new(provider, 1.0, ProcessFields::default(), tx).unwrap();

    assert_eq!(pids(&sampler.run_cycle()), vec![1, 2, 3]);
    let next = sampler.run_cycle();
    assert_eq!(pids(&next), vec![1, 3]);
    assert_eq!(next.status, CycleStatus::Complete);
}

#[test]
fn vanished_mid_scan_is_omitted_and_noted() {
    let provider = ScriptedProvider::new(vec![Script::WithVanished {
        alive: vec![10, 11],
        vanished: vec![12, 13],
    }]);
    let (tx, _rx) = snapshot_channel();
    let mut sampler = SamplingLoop::new(provider, 1.0, ProcessFields::default(), tx).unwrap();

    let snapshot = sampler.run_cycle();
    assert_eq!(pids(&snapshot), vec![10, 11]);
    assert_eq!(snapshot.status, CycleStatus::Partial { omitted: 2 });
}

#[test]
fn missing_attributes_are_normalized() {
    let (tx, _rx) = snapshot_channel();
    let mut sampler = SamplingLoop::new(
        ScriptedProvider::new(vec![Script::Processes(vec![7])]),
        1.0,
        ProcessFields::default(),
        tx,
    )
    .unwrap();

    let snapshot = sampler.run_cycle();
    let p = &snapshot.processes[0];
    assert_eq!(p.name, "proc7");
    assert_eq!(p.memory_percent, 0.0);
    assert_eq!(p.memory_bytes, 7 * 1024);
}

#[test]
fn gpu_and_network_default_to_zero() {
    let (tx, _rx) = snapshot_channel();
    let mut sampler =
        SamplingLoop::new(ScriptedProvider::new(vec![]), 1.0, ProcessFields::default(), tx).unwrap();
    let snapshot = sampler.run_cycle();
    assert_eq!(snapshot.gpu_percent, 0.0);
    assert_eq!(snapshot.network_percent, 0.0);
}

#[test]
fn out_of_range_scalars_are_clamped() {
    let mut provider = ScriptedProvider::new(vec![]);
    provider.cpu = 130.0;
    let (tx, _rx) = snapshot_channel();
    let mut sampler = SamplingLoop::new(provider, 1.0, ProcessFields::default(), tx).unwrap();
    assert_eq!(sampler.run_cycle().cpu_percent, 100.0);
}

#[test]
fn non_positive_window_is_rejected() {
    for window in [0.0, -0.5] {
        let (tx, _rx) = snapshot_channel();
        let result =
            SamplingLoop::new(ScriptedProvider::new(vec![]), window, ProcessFields::default(), tx);
        assert!(matches!(result, Err(MonitorError::InvalidSampleWindow(_))));
    }
}

#[test]
fn requested_fields_reach_the_provider() {
    let provider = ScriptedProvider::new(vec![]);
    let seen = Arc::clone(&provider.fields_seen);
    let fields = ProcessFields {
        cpu: false,
        memory: true,
    };
    let (tx, _rx) = snapshot_channel();
    let mut sampler = SamplingLoop::new(provider, 1.0, fields, tx).unwrap();
    sampler.run_cycle();
    assert_eq!(seen.lock().unwrap().as_slice(), &[fields]);
}

#[test]
fn published_snapshot_reaches_receiver() {
    let (tx, mut rx) = snapshot_channel();
    let mut sampler = SamplingLoop::new(
        ScriptedProvider::new(vec![Script::Processes(vec![5])]),
        1.0,
        ProcessFields::default(),
        tx,
    )
    .unwrap();

    let published = sampler.run_cycle();
    let received = rx.take_latest().expect("snapshot delivered");
    assert!(Arc::ptr_eq(&published, &received));
}

#[test]
fn spawned_loop_stops_on_signal() {
    let mut provider = ScriptedProvider::new(vec![Script::Unavailable]);
    provider.pace = Duration::from_millis(5);
    let (tx, mut rx) = snapshot_channel();
    let handle = SamplingLoop::new(provider, 0.005, ProcessFields::default(), tx)
        .unwrap()
        .spawn()
        .unwrap();

    let deadline = Instant::now() + Duration::from_secs(5);
    let mut last_seen = None;
    while Instant::now() < deadline {
        if let Some(s) = rx.take_latest() {
            last_seen = Some(s.sequence);
            if s.sequence >= 3 {
                break;
            }
        }
        thread::sleep(Duration::from_millis(1));
    }
    // The outage on cycle 0 must not have ended the loop.
    assert!(last_seen.is_some_and(|seq| seq >= 3), "loop stalled at {last_seen:?}");

    let stop = handle.stop_signal();
    handle.shutdown();
    assert!(stop.is_stopped());

    // Nothing new arrives once the thread has been joined.
    let _ = rx.take_latest();
    thread::sleep(Duration::from_millis(20));
    assert!(rx.take_latest().is_none());
}

#[test]
fn dropping_handle_stops_loop() {
    let mut provider = ScriptedProvider::new(vec![]);
    provider.pace = Duration::from_millis(2);
    let (tx, _rx) = snapshot_channel();
    let handle = SamplingLoop::new(provider, 0.002, ProcessFields::default(), tx)
        .unwrap()
        .spawn()
        .unwrap();
    let stop = handle.stop_signal();
    drop(handle);
    assert!(stop.is_stopped());
}

fn wait_until_finished(handle: &SamplerHandle) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if handle.is_finished() {
            return true;
        }
        thread::sleep(Duration::from_millis(1));
    }
    false
}

#[test]
fn raised_signal_ends_the_sampler_thread() {
    let mut provider = ScriptedProvider::new(vec![]);
    provider.pace = Duration::from_millis(2);
    let (tx, _rx) = snapshot_channel();
    let handle = SamplingLoop::new(provider, 0.002, ProcessFields::default(), tx)
        .unwrap()
        .spawn()
        .unwrap();
    assert!(!handle.is_finished());

    handle.stop_signal().stop();
    assert!(wait_until_finished(&handle), "sampler thread still running");
    handle.shutdown();
}

#[test]
fn pre_raised_signal_runs_no_cycles() {
    let (tx, mut rx) = snapshot_channel();
    let sampler = SamplingLoop::new(
        ScriptedProvider::new(vec![Script::Processes(vec![1])]),
        1.0,
        ProcessFields::default(),
        tx,
    )
    .unwrap();

    let stop = StopSignal::new();
    stop.stop();
    sampler.run(&stop);
    assert!(rx.take_latest().is_none());
}
