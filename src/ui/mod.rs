pub mod chart;
pub mod header;
pub mod process_table;
pub mod statusbar;
pub mod theme;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::App;

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let snapshot = &app.view.snapshot;
    header::render(frame, chunks[0], app.tab, snapshot, &app.theme);

    match app.tab.metric() {
        Some(metric) => chart::render(
            frame,
            chunks[1],
            metric,
            app.view.history.series(metric),
            &app.theme,
        ),
        None => process_table::render(frame, chunks[1], snapshot, app.scroll, &app.theme),
    }

    let status = statusbar::StatusInfo {
        snapshot,
        has_data: app.view.has_data,
        skipped_cycles: app.skipped_cycles(),
        sampler_alive: app.sampler_alive,
    };
    statusbar::render(frame, chunks[2], &status, &app.theme);
}
