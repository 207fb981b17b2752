use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProcessMetric {
    pub pid: u32,
    pub name: String,
    pub cpu_percent: f32,
    pub memory_percent: f32,
    pub memory_bytes: u64,
}

/// How complete a cycle's process list is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CycleStatus {
    #[default]
    Complete,
    /// Some processes exited or denied access between enumeration and read.
    Partial { omitted: usize },
    /// The process table could not be read at all; `processes` is empty.
    ProviderUnavailable,
}

/// One reading of every tracked metric. Published behind an `Arc` and never
/// mutated afterwards.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SystemSnapshot {
    pub sequence: u64,
    pub status: CycleStatus,
    pub cpu_percent: f32,
    pub memory_percent: f32,
    pub gpu_percent: f32,
    pub network_percent: f32,
    pub processes: Vec<ProcessMetric>,
}

impl SystemSnapshot {
    pub fn scalar(&self, metric: ScalarMetric) -> f32 {
        match metric {
            ScalarMetric::Cpu => self.cpu_percent,
            ScalarMetric::Memory => self.memory_percent,
            ScalarMetric::Gpu => self.gpu_percent,
            ScalarMetric::Network => self.network_percent,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarMetric {
    Cpu,
    Memory,
    Gpu,
    Network,
}

impl ScalarMetric {
    pub const ALL: [ScalarMetric; 4] = [
        ScalarMetric::Cpu,
        ScalarMetric::Memory,
        ScalarMetric::Gpu,
        ScalarMetric::Network,
    ];

    pub fn index(self) -> usize {
        match self {
            ScalarMetric::Cpu => 0,
            ScalarMetric::Memory => 1,
            ScalarMetric::Gpu => 2,
            ScalarMetric::Network => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScalarMetric::Cpu => "CPU",
            ScalarMetric::Memory => "Memory",
            ScalarMetric::Gpu => "GPU",
            ScalarMetric::Network => "Network",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_reads_matching_field() {
        let snapshot = SystemSnapshot {
            cpu_percent: 1.0,
            memory_percent: 2.0,
            gpu_percent: 3.0,
            network_percent: 4.0,
            ..SystemSnapshot::default()
        };
        let values: Vec<f32> = ScalarMetric::ALL
            .iter()
            .map(|&m| snapshot.scalar(m))
            .collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn metric_indices_are_dense() {
        for (i, metric) in ScalarMetric::ALL.iter().enumerate() {
            assert_eq!(metric.index(), i);
        }
    }

    #[test]
    fn status_serializes_with_kind_tag() {
        let json = serde_json::to_string(&CycleStatus::Partial { omitted: 2 }).unwrap();
        assert_eq!(json, r#"{"kind":"partial","omitted":2}"#);
        let json = serde_json::to_string(&CycleStatus::ProviderUnavailable).unwrap();
        assert_eq!(json, r#"{"kind":"provider_unavailable"}"#);
    }
}
