use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::system::snapshot::{CycleStatus, SystemSnapshot};
use crate::ui::theme::Theme;

pub struct StatusInfo<'a> {
    pub snapshot: &'a SystemSnapshot,
    pub has_data: bool,
    pub skipped_cycles: u64,
    pub sampler_alive: bool,
}

pub fn render(frame: &mut Frame, area: Rect, info: &StatusInfo, theme: &Theme) {
    let bg_style = Style::default().bg(theme.statusbar_bg);
    let muted = Style::default().fg(theme.text_secondary);
    let ok = Style::default().fg(theme.status_ok);
    let warn = Style::default()
        .fg(theme.status_warn)
        .add_modifier(Modifier::BOLD);

    let mut spans = vec![Span::styled(" q Quit  Tab/1-5 Switch  \u{2191}\u{2193} Scroll ", muted)];

    if !info.sampler_alive {
        spans.push(Span::styled(" sampler stopped ", warn));
    } else if !info.has_data {
        spans.push(Span::styled(" sampling\u{2026} ", muted));
    } else {
        spans.push(Span::styled(format!(" cycle #{} ", info.snapshot.sequence), ok));
        match info.snapshot.status {
            CycleStatus::Complete => {}
            CycleStatus::Partial { omitted } => {
                spans.push(Span::styled(format!(" {omitted} exited mid-scan "), muted));
            }
            CycleStatus::ProviderUnavailable => {
                spans.push(Span::styled(" process list unavailable ", warn));
            }
        }
    }

    if info.skipped_cycles > 0 {
        spans.push(Span::styled(format!(" skipped {} ", info.skipped_cycles), muted));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg_style), area);
}
