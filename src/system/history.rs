use std::collections::VecDeque;

use crate::error::MonitorError;
use crate::system::snapshot::ScalarMetric;

pub const DEFAULT_CAPACITY: usize = 100;

/// Fixed-capacity history of one scalar metric.
///
/// Points are indexed by recency slot: index 0 is always the oldest retained
/// value, so the indices shift down by one whenever a value is evicted.
#[derive(Debug, Clone)]
pub struct TimeSeriesBuffer {
    values: VecDeque<f64>,
    capacity: usize,
}

impl TimeSeriesBuffer {
    pub fn new(capacity: usize) -> Result<Self, MonitorError> {
        if capacity == 0 {
            return Err(MonitorError::InvalidCapacity(capacity));
        }
        Ok(Self {
            values: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    pub fn append(&mut self, value: f64) {
        if self.values.len() == self.capacity {
            self.values.pop_front();
        }
        self.values.push_back(value);
    }

    pub fn snapshot(&self) -> Vec<(usize, f64)> {
        self.values.iter().copied().enumerate().collect()
    }

    /// Points in the `(x, y)` form chart widgets expect.
    pub fn chart_points(&self) -> Vec<(f64, f64)> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as f64, v))
            .collect()
    }

    pub fn latest(&self) -> Option<f64> {
        self.values.back().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// One buffer per tracked scalar metric, owned by the consumer side.
#[derive(Debug, Clone)]
pub struct MetricHistory {
    series: [TimeSeriesBuffer; 4],
}

impl MetricHistory {
    pub fn new(capacity: usize) -> Result<Self, MonitorError> {
        let buffer = TimeSeriesBuffer::new(capacity)?;
        Ok(Self {
            series: [buffer.clone(), buffer.clone(), buffer.clone(), buffer],
        })
    }

    pub fn record(&mut self, metric: ScalarMetric, value: f64) {
        self.series[metric.index()].append(value);
    }

    pub fn series(&self, metric: ScalarMetric) -> &TimeSeriesBuffer {
        &self.series[metric.index()]
    }

    pub fn capacity(&self) -> usize {
        self.series[0].capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_oldest_and_renumbers() {
        let mut buf = TimeSeriesBuffer::new(3).unwrap();
        for v in [10.0, 20.0, 30.0, 40.0] {
            buf.append(v);
        }
        assert_eq!(buf.snapshot(), vec![(0, 20.0), (1, 30.0), (2, 40.0)]);
    }

    #[test]
    fn first_append_starts_at_index_zero() {
        let mut buf = TimeSeriesBuffer::new(5).unwrap();
        assert!(buf.is_empty());
        buf.append(7.5);
        assert_eq!(buf.snapshot(), vec![(0, 7.5)]);
        assert_eq!(buf.latest(), Some(7.5));
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let err = TimeSeriesBuffer::new(0).unwrap_err();
        assert!(matches!(err, MonitorError::InvalidCapacity(0)));
        assert!(MetricHistory::new(0).is_err());
    }

    #[test]
    fn capacity_one_keeps_only_latest() {
        let mut buf = TimeSeriesBuffer::new(1).unwrap();
        buf.append(1.0);
        buf.append(2.0);
        assert_eq!(buf.snapshot(), vec![(0, 2.0)]);
    }

    #[test]
    fn snapshot_does_not_mutate() {
        let mut buf = TimeSeriesBuffer::new(2).unwrap();
        buf.append(1.0);
        let _ = buf.snapshot();
        let _ = buf.chart_points();
        assert_eq!(buf.len(), 1);
    }

    #[test]
    fn history_routes_by_metric() {
        let mut history = MetricHistory::new(4).unwrap();
        history.record(ScalarMetric::Cpu, 12.0);
        history.record(ScalarMetric::Network, 0.0);
        assert_eq!(history.series(ScalarMetric::Cpu).latest(), Some(12.0));
        assert!(history.series(ScalarMetric::Memory).is_empty());
        assert_eq!(history.series(ScalarMetric::Network).len(), 1);
        assert_eq!(history.capacity(), 4);
    }
}
