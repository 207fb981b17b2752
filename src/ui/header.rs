use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Tabs};

use crate::app::Tab;
use crate::format::format_percent;
use crate::system::snapshot::SystemSnapshot;
use crate::ui::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, active: Tab, snapshot: &SystemSnapshot, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    render_tabs(frame, chunks[0], active, theme);
    render_summary(frame, chunks[1], snapshot, theme);
}

fn render_tabs(frame: &mut Frame, area: Rect, active: Tab, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
        .title(Span::styled(
            " tasktop ",
            Style::default()
                .fg(theme.text_primary)
                .add_modifier(Modifier::BOLD),
        ));

    let titles: Vec<Line> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| Line::from(format!("{} {}", i + 1, tab.label())))
        .collect();

    let tabs = Tabs::new(titles)
        .block(block)
        .select(active.index())
        .style(Style::default().fg(theme.text_secondary))
        .highlight_style(
            Style::default()
                .fg(theme.tab_active_fg)
                .bg(theme.tab_active_bg)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

fn render_summary(frame: &mut Frame, area: Rect, snapshot: &SystemSnapshot, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let label = Style::default().fg(theme.text_secondary);
    let value = Style::default()
        .fg(theme.text_primary)
        .add_modifier(Modifier::BOLD);

    let line = Line::from(vec![
        Span::styled(" CPU ", label),
        Span::styled(format!("{}%", format_percent(snapshot.cpu_percent)), value),
        Span::styled("  MEM ", label),
        Span::styled(format!("{}%", format_percent(snapshot.memory_percent)), value),
        Span::styled("  Procs ", label),
        Span::styled(snapshot.processes.len().to_string(), value),
    ]);
    frame.render_widget(Paragraph::new(line), inner);
}
