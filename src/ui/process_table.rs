use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders, Cell, Row, Table};

use crate::format::{format_gib, format_percent, truncate_unicode};
use crate::system::snapshot::{CycleStatus, SystemSnapshot};
use crate::ui::theme::Theme;

const NAME_WIDTH: usize = 32;

pub fn render(frame: &mut Frame, area: Rect, snapshot: &SystemSnapshot, scroll: usize, theme: &Theme) {
    let title = match snapshot.status {
        CycleStatus::ProviderUnavailable => " Processes (unavailable) ".to_string(),
        _ => format!(" Processes ({}) ", snapshot.processes.len()),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme.text_primary)
                .add_modifier(Modifier::BOLD),
        ));

    let header_style = Style::default()
        .fg(theme.table_header)
        .add_modifier(Modifier::BOLD);
    let header = Row::new(
        ["PID", "Process Name", "CPU %", "Memory %", "Memory (GB)"]
            .into_iter()
            .map(|h| Cell::from(h).style(header_style)),
    )
    .height(1);

    // Header row plus the two border rows.
    let visible = area.height.saturating_sub(3) as usize;
    let rows: Vec<Row> = snapshot
        .processes
        .iter()
        .enumerate()
        .skip(scroll)
        .take(visible)
        .map(|(i, p)| {
            let style = if i % 2 == 1 {
                Style::default().fg(theme.text_primary).bg(theme.row_alt_bg)
            } else {
                Style::default().fg(theme.text_primary)
            };
            Row::new(vec![
                Cell::from(p.pid.to_string()),
                Cell::from(truncate_unicode(&p.name, NAME_WIDTH)),
                Cell::from(format_percent(p.cpu_percent)),
                Cell::from(format_percent(p.memory_percent)),
                Cell::from(format_gib(p.memory_bytes)),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Min(16),
            Constraint::Length(8),
            Constraint::Length(10),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .block(block);

    frame.render_widget(table, area);
}
