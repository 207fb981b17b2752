use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::action::Action;
use crate::error::MonitorError;
use crate::system::channel::{MetricsSink, SnapshotReceiver};
use crate::system::history::MetricHistory;
use crate::system::snapshot::{ScalarMetric, SystemSnapshot};
use crate::ui::theme::Theme;

const PAGE_ROWS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Processes,
    Cpu,
    Memory,
    Gpu,
    Network,
}

impl Tab {
    pub const ALL: [Tab; 5] = [Tab::Processes, Tab::Cpu, Tab::Memory, Tab::Gpu, Tab::Network];

    pub fn next(self) -> Self {
        match self {
            Tab::Processes => Tab::Cpu,
            Tab::Cpu => Tab::Memory,
            Tab::Memory => Tab::Gpu,
            Tab::Gpu => Tab::Network,
            Tab::Network => Tab::Processes,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Tab::Processes => Tab::Network,
            Tab::Cpu => Tab::Processes,
            Tab::Memory => Tab::Cpu,
            Tab::Gpu => Tab::Memory,
            Tab::Network => Tab::Gpu,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::Processes => 0,
            Tab::Cpu => 1,
            Tab::Memory => 2,
            Tab::Gpu => 3,
            Tab::Network => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::Processes => "Processes",
            Tab::Cpu => "CPU",
            Tab::Memory => "Memory",
            Tab::Gpu => "GPU",
            Tab::Network => "Network",
        }
    }

    /// The scalar metric charted on this tab, if any.
    pub fn metric(self) -> Option<ScalarMetric> {
        match self {
            Tab::Processes => None,
            Tab::Cpu => Some(ScalarMetric::Cpu),
            Tab::Memory => Some(ScalarMetric::Memory),
            Tab::Gpu => Some(ScalarMetric::Gpu),
            Tab::Network => Some(ScalarMetric::Network),
        }
    }
}

/// Consumer-side copy of everything the UI draws.
#[derive(Debug)]
pub struct MetricsView {
    pub snapshot: Arc<SystemSnapshot>,
    pub history: MetricHistory,
    /// False until the first snapshot arrives.
    pub has_data: bool,
}

impl MetricsView {
    pub fn new(history_capacity: usize) -> Result<Self, MonitorError> {
        Ok(MetricsView {
            snapshot: Arc::new(SystemSnapshot::default()),
            history: MetricHistory::new(history_capacity)?,
            has_data: false,
        })
    }
}

impl MetricsSink for MetricsView {
    fn on_snapshot(&mut self, snapshot: &Arc<SystemSnapshot>) {
        self.snapshot = Arc::clone(snapshot);
        self.has_data = true;
    }

    fn on_scalar_metric(&mut self, metric: ScalarMetric, value: f32) {
        self.history.record(metric, f64::from(value));
    }
}

pub struct App {
    pub running: bool,
    pub tab: Tab,
    pub scroll: usize,
    pub view: MetricsView,
    pub theme: Theme,
    pub sampler_alive: bool,
    receiver: SnapshotReceiver,
}

impl App {
    pub fn new(
        receiver: SnapshotReceiver,
        history_capacity: usize,
        theme: Theme,
    ) -> Result<Self, MonitorError> {
        Ok(App {
            running: true,
            tab: Tab::default(),
            scroll: 0,
            view: MetricsView::new(history_capacity)?,
            theme,
            sampler_alive: true,
            receiver,
        })
    }

    /// Pull the newest snapshot, if any, into the view.
    pub fn refresh_data(&mut self) -> bool {
        let updated = self.receiver.drain_into(&mut self.view);
        if updated {
            self.clamp_scroll();
        }
        updated
    }

    pub fn skipped_cycles(&self) -> u64 {
        self.receiver.skipped_cycles()
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Tab | KeyCode::Right => Action::NextTab,
            KeyCode::BackTab | KeyCode::Left => Action::PrevTab,
            KeyCode::Up | KeyCode::Char('k') => Action::ScrollUp,
            KeyCode::Down | KeyCode::Char('j') => Action::ScrollDown,
            KeyCode::PageUp => Action::PageUp,
            KeyCode::PageDown => Action::PageDown,
            KeyCode::Char(c @ '1'..='5') => {
                let idx = (c as usize) - ('1' as usize);
                Action::SelectTab(Tab::ALL[idx])
            }
            _ => Action::None,
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::NextTab => self.tab = self.tab.next(),
            Action::PrevTab => self.tab = self.tab.prev(),
            Action::SelectTab(tab) => self.tab = tab,
            Action::ScrollUp => self.scroll = self.scroll.saturating_sub(1),
            Action::ScrollDown => {
                self.scroll += 1;
                self.clamp_scroll();
            }
            Action::PageUp => self.scroll = self.scroll.saturating_sub(PAGE_ROWS),
            Action::PageDown => {
                self.scroll += PAGE_ROWS;
                self.clamp_scroll();
            }
            Action::None => {}
        }
    }

    pub fn on_metrics_closed(&mut self) {
        tracing::warn!("sampler stopped publishing; showing last known values");
        self.sampler_alive = false;
    }

    fn clamp_scroll(&mut self) {
        let rows = self.view.snapshot.processes.len();
        self.scroll = self.scroll.min(rows.saturating_sub(1));
    }
}
