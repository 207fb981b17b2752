//! Latest-value hand-off between the sampling thread and the consumer.
//!
//! Built on `tokio::sync::watch`: a publish swaps the stored value under the
//! channel's lock, so a reader sees either the old snapshot or the new one in
//! full. Undelivered snapshots are replaced, never queued.

use std::sync::Arc;

use tokio::sync::watch;

use crate::system::snapshot::{ScalarMetric, SystemSnapshot};

/// Presentation update interface.
pub trait MetricsSink {
    fn on_snapshot(&mut self, snapshot: &Arc<SystemSnapshot>);
    fn on_scalar_metric(&mut self, metric: ScalarMetric, value: f32);
}

pub fn snapshot_channel() -> (SnapshotPublisher, SnapshotReceiver) {
    let (tx, rx) = watch::channel(None);
    (
        SnapshotPublisher { tx },
        SnapshotReceiver {
            rx,
            last_sequence: None,
            skipped: 0,
        },
    )
}

pub struct SnapshotPublisher {
    tx: watch::Sender<Option<Arc<SystemSnapshot>>>,
}

impl SnapshotPublisher {
    /// Replace the current value. Never blocks and succeeds even when no
    /// receiver is listening.
    pub fn publish(&self, snapshot: SystemSnapshot) -> Arc<SystemSnapshot> {
        let shared = Arc::new(snapshot);
        self.tx.send_replace(Some(Arc::clone(&shared)));
        shared
    }
}

#[derive(Clone)]
pub struct SnapshotReceiver {
    rx: watch::Receiver<Option<Arc<SystemSnapshot>>>,
    last_sequence: Option<u64>,
    skipped: u64,
}

impl SnapshotReceiver {
    /// The newest snapshot not yet seen by this receiver, if any.
    ///
    /// "Seen" is tracked by sequence number rather than the watch version, so
    /// calling [`changed`](Self::changed) first does not hide the value.
    pub fn take_latest(&mut self) -> Option<Arc<SystemSnapshot>> {
        let latest = Option::clone(&self.rx.borrow_and_update())?;
        if self
            .last_sequence
            .is_some_and(|seen| latest.sequence <= seen)
        {
            return None;
        }
        self.note_sequence(latest.sequence);
        Some(latest)
    }

    /// Wait for the next publish. Returns `false` once the publisher is gone.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }

    /// Deliver the newest snapshot to `sink`, followed by its four scalar
    /// values. Returns whether anything was delivered.
    pub fn drain_into<S: MetricsSink + ?Sized>(&mut self, sink: &mut S) -> bool {
        let Some(snapshot) = self.take_latest() else {
            return false;
        };
        sink.on_snapshot(&snapshot);
        for metric in ScalarMetric::ALL {
            sink.on_scalar_metric(metric, snapshot.scalar(metric));
        }
        true
    }

    /// Cycles published but never observed by this receiver.
    pub fn skipped_cycles(&self) -> u64 {
        self.skipped
    }

    fn note_sequence(&mut self, sequence: u64) {
        if let Some(prev) = self.last_sequence
            && sequence > prev + 1
        {
            let gap = sequence - prev - 1;
            self.skipped += gap;
            tracing::debug!(prev, sequence, gap, "consumer skipped sampling cycles");
        }
        self.last_sequence = Some(sequence);
    }
}
