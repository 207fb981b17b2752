pub mod channel;
pub mod history;
pub mod provider;
pub mod sampler;
pub mod snapshot;
pub mod sysinfo_provider;

pub use channel::{MetricsSink, SnapshotPublisher, SnapshotReceiver, snapshot_channel};
pub use history::{MetricHistory, TimeSeriesBuffer};
pub use provider::{MetricsProvider, ProcessFields, ProcessProbe, RawProcess};
pub use sampler::{SamplerHandle, SamplingLoop, StopSignal};
pub use snapshot::{CycleStatus, ProcessMetric, ScalarMetric, SystemSnapshot};
